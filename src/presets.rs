//! Named port presets.
//!
//! The lists follow nmap's TCP port frequency ranking. `top1000` is stored as
//! inclusive ranges to keep the table readable.

use crate::types::{Port, PortSet};
use std::fmt;

/// Nmap's 100 most common TCP ports.
const TOP_100: &[u32] = &[
    7, 9, 13, 21, 22, 23, 25, 26, 37, 53, 79, 80, 81, 88, 106, 110, 111, 113, 119, 135, 139, 143,
    144, 179, 199, 389, 427, 443, 444, 445, 465, 513, 514, 515, 543, 544, 548, 554, 587, 631, 646,
    873, 990, 993, 995, 1025, 1026, 1027, 1028, 1029, 1110, 1433, 1720, 1723, 1755, 1900, 2000,
    2001, 2049, 2121, 2717, 3000, 3128, 3306, 3389, 3986, 4899, 5000, 5009, 5051, 5060, 5101,
    5190, 5357, 5432, 5631, 5666, 5800, 5900, 6000, 6001, 6646, 7070, 8000, 8008, 8009, 8080,
    8081, 8443, 8888, 9100, 9999, 10000, 32768, 49152, 49153, 49154, 49155, 49156, 49157,
];

/// Nmap's 1000 most common TCP ports, as inclusive ranges.
const TOP_1000: &[(u32, u32)] = &[
    (1, 1), (3, 4), (6, 7), (9, 9), (13, 13), (17, 17), (19, 26), (30, 30), (32, 33), (37, 37),
    (42, 43), (49, 49), (53, 53), (70, 70), (79, 85), (88, 90), (99, 100), (106, 106),
    (109, 111), (113, 113), (119, 119), (125, 125), (135, 135), (139, 139), (143, 144),
    (146, 146), (161, 161), (163, 163), (179, 179), (199, 199), (211, 212), (222, 222),
    (254, 256), (259, 259), (264, 264), (280, 280), (301, 301), (306, 306), (311, 311),
    (340, 340), (366, 366), (389, 389), (406, 407), (416, 417), (425, 425), (427, 427),
    (443, 445), (458, 458), (464, 465), (481, 481), (497, 497), (500, 500), (512, 515),
    (524, 524), (541, 541), (543, 545), (548, 548), (554, 555), (563, 563), (587, 587),
    (593, 593), (616, 617), (625, 625), (631, 631), (636, 636), (646, 646), (648, 648),
    (666, 668), (683, 683), (687, 687), (691, 691), (700, 700), (705, 705), (711, 711),
    (714, 714), (720, 720), (722, 722), (726, 726), (749, 749), (765, 765), (777, 777),
    (783, 783), (787, 787), (800, 801), (808, 808), (843, 843), (873, 873), (880, 880),
    (888, 888), (898, 898), (900, 903), (911, 912), (981, 981), (987, 987), (990, 990),
    (992, 993), (995, 995), (999, 1002), (1007, 1007), (1009, 1011), (1021, 1100), (1102, 1102),
    (1104, 1108), (1110, 1114), (1117, 1117), (1119, 1119), (1121, 1124), (1126, 1126),
    (1130, 1132), (1137, 1138), (1141, 1141), (1145, 1145), (1147, 1149), (1151, 1152),
    (1154, 1154), (1163, 1166), (1169, 1169), (1174, 1175), (1183, 1183), (1185, 1187),
    (1192, 1192), (1198, 1199), (1201, 1201), (1213, 1213), (1216, 1218), (1233, 1234),
    (1236, 1236), (1244, 1244), (1247, 1248), (1259, 1259), (1271, 1272), (1277, 1277),
    (1287, 1287), (1296, 1296), (1300, 1301), (1309, 1311), (1322, 1322), (1328, 1328),
    (1334, 1334), (1352, 1352), (1417, 1417), (1433, 1434), (1443, 1443), (1455, 1455),
    (1461, 1461), (1494, 1494), (1500, 1501), (1503, 1503), (1521, 1521), (1524, 1524),
    (1533, 1533), (1556, 1556), (1580, 1580), (1583, 1583), (1594, 1594), (1600, 1600),
    (1641, 1641), (1658, 1658), (1666, 1666), (1687, 1688), (1700, 1700), (1717, 1721),
    (1723, 1723), (1755, 1755), (1761, 1761), (1782, 1783), (1801, 1801), (1805, 1805),
    (1812, 1812), (1839, 1840), (1862, 1864), (1875, 1875), (1900, 1900), (1914, 1914),
    (1935, 1935), (1947, 1947), (1971, 1972), (1974, 1974), (1984, 1984), (1998, 2010),
    (2013, 2013), (2020, 2022), (2030, 2030), (2033, 2035), (2038, 2038), (2040, 2043),
    (2045, 2049), (2065, 2065), (2068, 2068), (2099, 2100), (2103, 2103), (2105, 2107),
    (2111, 2111), (2119, 2119), (2121, 2121), (2126, 2126), (2135, 2135), (2144, 2144),
    (2160, 2161), (2170, 2170), (2179, 2179), (2190, 2191), (2196, 2196), (2200, 2200),
    (2222, 2222), (2251, 2251), (2260, 2260), (2288, 2288), (2301, 2301), (2323, 2323),
    (2366, 2366), (2381, 2383), (2393, 2394), (2399, 2399), (2401, 2401), (2492, 2492),
    (2500, 2500), (2522, 2522), (2525, 2525), (2557, 2557), (2601, 2602), (2604, 2605),
    (2607, 2608), (2638, 2638), (2701, 2702), (2710, 2710), (2717, 2718), (2725, 2725),
    (2800, 2800), (2809, 2809), (2811, 2811), (2869, 2869), (2875, 2875), (2909, 2910),
    (2920, 2920), (2967, 2968), (2998, 2998), (3000, 3001), (3003, 3003), (3005, 3007),
    (3011, 3011), (3013, 3013), (3017, 3017), (3030, 3031), (3052, 3052), (3071, 3071),
    (3077, 3077), (3128, 3128), (3168, 3168), (3211, 3211), (3221, 3221), (3260, 3261),
    (3268, 3269), (3283, 3283), (3300, 3301), (3306, 3306), (3322, 3325), (3333, 3333),
    (3351, 3351), (3367, 3367), (3369, 3372), (3389, 3390), (3404, 3404), (3476, 3476),
    (3493, 3493), (3517, 3517), (3527, 3527), (3546, 3546), (3551, 3551), (3580, 3580),
    (3659, 3659), (3689, 3690), (3703, 3703), (3737, 3737), (3766, 3766), (3784, 3784),
    (3800, 3801), (3809, 3809), (3814, 3814), (3826, 3828), (3851, 3851), (3869, 3869),
    (3871, 3871), (3878, 3878), (3880, 3880), (3889, 3889), (3905, 3905), (3914, 3914),
    (3918, 3918), (3920, 3920), (3945, 3945), (3971, 3971), (3986, 3986), (3995, 3995),
    (3998, 3998), (4000, 4006), (4045, 4045), (4111, 4111), (4125, 4126), (4129, 4129),
    (4224, 4224), (4242, 4242), (4279, 4279), (4321, 4321), (4343, 4343), (4443, 4446),
    (4449, 4449), (4550, 4550), (4567, 4567), (4662, 4662), (4848, 4848), (4899, 4900),
    (4998, 4998), (5000, 5004), (5009, 5009), (5030, 5030), (5033, 5033), (5050, 5051),
    (5054, 5054), (5060, 5061), (5080, 5080), (5087, 5087), (5100, 5102), (5120, 5120),
    (5190, 5190), (5200, 5200), (5214, 5214), (5221, 5222), (5225, 5226), (5269, 5269),
    (5280, 5280), (5298, 5298), (5357, 5357), (5405, 5405), (5414, 5414), (5431, 5432),
    (5440, 5440), (5500, 5500), (5510, 5510), (5544, 5544), (5550, 5550), (5555, 5555),
    (5560, 5560), (5566, 5566), (5631, 5631), (5633, 5633), (5666, 5666), (5678, 5679),
    (5718, 5718), (5730, 5730), (5800, 5802), (5810, 5811), (5815, 5815), (5822, 5822),
    (5825, 5825), (5850, 5850), (5859, 5859), (5862, 5862), (5877, 5877), (5900, 5904),
    (5906, 5907), (5910, 5911), (5915, 5915), (5922, 5922), (5925, 5925), (5950, 5950),
    (5952, 5952), (5959, 5963), (5987, 5989), (5998, 6007), (6009, 6009), (6025, 6025),
    (6059, 6059), (6100, 6101), (6106, 6106), (6112, 6112), (6123, 6123), (6129, 6129),
    (6156, 6156), (6346, 6346), (6389, 6389), (6502, 6502), (6510, 6510), (6543, 6543),
    (6547, 6547), (6565, 6567), (6580, 6580), (6646, 6646), (6666, 6669), (6689, 6689),
    (6692, 6692), (6699, 6699), (6779, 6779), (6788, 6789), (6792, 6792), (6839, 6839),
    (6881, 6881), (6901, 6901), (6969, 6969), (7000, 7002), (7004, 7004), (7007, 7007),
    (7019, 7019), (7025, 7025), (7070, 7070), (7100, 7100), (7103, 7103), (7106, 7106),
    (7200, 7201), (7402, 7402), (7435, 7435), (7443, 7443), (7496, 7496), (7512, 7512),
    (7625, 7625), (7627, 7627), (7676, 7676), (7741, 7741), (7777, 7778), (7800, 7800),
    (7911, 7911), (7920, 7921), (7937, 7938), (7999, 8002), (8007, 8011), (8021, 8022),
    (8031, 8031), (8042, 8042), (8045, 8045), (8080, 8090), (8093, 8093), (8099, 8100),
    (8180, 8181), (8192, 8194), (8200, 8200), (8222, 8222), (8254, 8254), (8290, 8292),
    (8300, 8300), (8333, 8333), (8383, 8383), (8400, 8400), (8402, 8402), (8443, 8443),
    (8500, 8500), (8600, 8600), (8649, 8649), (8651, 8652), (8654, 8654), (8701, 8701),
    (8800, 8800), (8873, 8873), (8888, 8888), (8899, 8899), (8994, 8994), (9000, 9003),
    (9009, 9011), (9040, 9040), (9050, 9050), (9071, 9071), (9080, 9081), (9090, 9091),
    (9099, 9103), (9110, 9111), (9200, 9200), (9207, 9207), (9220, 9220), (9290, 9290),
    (9415, 9415), (9418, 9418), (9485, 9485), (9500, 9500), (9502, 9503), (9535, 9535),
    (9575, 9575), (9593, 9595), (9618, 9618), (9666, 9666), (9876, 9878), (9898, 9898),
    (9900, 9900), (9917, 9917), (9929, 9929), (9943, 9944), (9968, 9968), (9998, 10004),
    (10009, 10010), (10012, 10012), (10024, 10025), (10082, 10082), (10180, 10180),
    (10215, 10215), (10243, 10243), (10566, 10566), (10616, 10617), (10621, 10621),
    (10626, 10626), (10628, 10629), (10778, 10778), (11110, 11111), (11967, 11967),
    (12000, 12000), (12174, 12174), (12265, 12265), (12345, 12345), (13456, 13456),
    (13722, 13722), (13782, 13783), (14000, 14000), (14238, 14238), (14441, 14442),
    (15000, 15000), (15002, 15004), (15660, 15660), (15742, 15742), (16000, 16001),
    (16012, 16012), (16016, 16016), (16018, 16018), (16080, 16080), (16113, 16113),
    (16992, 16993), (17877, 17877), (17988, 17988), (18040, 18040), (18101, 18101),
    (18988, 18988), (19101, 19101), (19283, 19283), (19315, 19315), (19350, 19350),
    (19780, 19780), (19801, 19801), (19842, 19842), (20000, 20000), (20005, 20005),
    (20031, 20031), (20221, 20222), (20828, 20828), (21571, 21571), (22939, 22939),
    (23502, 23502), (24444, 24444), (24800, 24800), (25734, 25735), (26214, 26214),
    (27000, 27000), (27352, 27353), (27355, 27356), (27715, 27715), (28201, 28201),
    (30000, 30000), (30718, 30718), (30951, 30951), (31038, 31038), (31337, 31337),
    (32768, 32785), (33354, 33354), (33899, 33899), (34571, 34573), (35500, 35500),
    (38292, 38292), (40193, 40193), (40911, 40911), (41511, 41511), (42510, 42510),
    (44176, 44176), (44442, 44443), (44501, 44501), (45100, 45100), (48080, 48080),
    (49152, 49161), (49163, 49163), (49165, 49165), (49167, 49167), (49175, 49176),
    (49400, 49400), (49999, 50003), (50006, 50006), (50300, 50300), (50389, 50389),
    (50500, 50500), (50636, 50636), (50800, 50800), (51103, 51103), (51493, 51493),
    (52673, 52673), (52822, 52822), (52848, 52848), (52869, 52869), (54045, 54045),
    (54328, 54328), (55055, 55056), (55555, 55555), (55600, 55600), (56737, 56738),
    (57294, 57294), (57797, 57797), (58080, 58080), (60020, 60020), (60443, 60443),
    (61532, 61532), (61900, 61900), (62078, 62078), (63331, 63331), (64623, 64623),
    (64680, 64680), (65000, 65000), (65129, 65129), (65389, 65389),
];

/// Size of the `top500` preset.
const TOP_500_LEN: usize = 500;

/// A named shorthand port specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Top100,
    Top500,
    Top1000,
    /// Every port, 1-65535. Spelled `-` on the command line.
    Full,
}

impl Preset {
    /// Look up a preset by name. Matching ignores case and surrounding whitespace.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "top100" => Some(Self::Top100),
            "top500" => Some(Self::Top500),
            "top1000" => Some(Self::Top1000),
            "-" => Some(Self::Full),
            _ => None,
        }
    }

    /// The name accepted by [`Preset::from_name`].
    pub fn name(self) -> &'static str {
        match self {
            Self::Top100 => "top100",
            Self::Top500 => "top500",
            Self::Top1000 => "top1000",
            Self::Full => "-",
        }
    }

    /// Expand the preset into its port set.
    pub fn ports(self) -> PortSet {
        match self {
            Self::Top100 => PortSet::from_ports(TOP_100.iter().copied().map(Port::new)),
            // top100 first, then the rest of top1000 in ascending order.
            Self::Top500 => {
                let top100 = TOP_100.iter().copied();
                let mut set = PortSet::from_ports(top100.chain(top_1000()).map(Port::new));
                set.truncate(TOP_500_LEN);
                set
            }
            Self::Top1000 => PortSet::from_ports(top_1000().map(Port::new)),
            Self::Full => PortSet::from_ports((Port::MIN..=Port::MAX).map(Port::new)),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Top100 => write!(f, "top 100 most common TCP ports"),
            Self::Top500 => write!(f, "top 500 most common TCP ports"),
            Self::Top1000 => write!(f, "top 1000 most common TCP ports"),
            Self::Full => write!(f, "all 65535 TCP ports"),
        }
    }
}

fn top_1000() -> impl Iterator<Item = u32> {
    TOP_1000.iter().flat_map(|&(start, end)| start..=end)
}
