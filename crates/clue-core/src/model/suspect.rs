use crate::model::location::Location;
use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Suspect {
    Scarlet = 0,
    Mustard = 1,
    White = 2,
    Green = 3,
    Peacock = 4,
    Plum = 5,
}

impl Suspect {
    pub const ALL: [Suspect; 6] = [
        Suspect::Scarlet,
        Suspect::Mustard,
        Suspect::White,
        Suspect::Green,
        Suspect::Peacock,
        Suspect::Plum,
    ];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Suspect::Scarlet),
            1 => Some(Suspect::Mustard),
            2 => Some(Suspect::White),
            3 => Some(Suspect::Green),
            4 => Some(Suspect::Peacock),
            5 => Some(Suspect::Plum),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_name(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "scarlet" => Some(Suspect::Scarlet),
            "mustard" => Some(Suspect::Mustard),
            "white" => Some(Suspect::White),
            "green" => Some(Suspect::Green),
            "peacock" => Some(Suspect::Peacock),
            "plum" => Some(Suspect::Plum),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Suspect::Scarlet => "Scarlet",
            Suspect::Mustard => "Mustard",
            Suspect::White => "White",
            Suspect::Green => "Green",
            Suspect::Peacock => "Peacock",
            Suspect::Plum => "Plum",
        }
    }

    /// Hallway each suspect's token starts the game in.
    pub const fn starting_location(self) -> Location {
        match self {
            Suspect::Scarlet => Location::hallway(2),
            Suspect::Mustard => Location::hallway(3),
            Suspect::White => Location::hallway(12),
            Suspect::Green => Location::hallway(6),
            Suspect::Peacock => Location::hallway(7),
            Suspect::Plum => Location::hallway(8),
        }
    }
}

impl fmt::Display for Suspect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::Suspect;
    use crate::model::location::Location;

    #[test]
    fn names_parse_case_insensitively() {
        assert_eq!(Suspect::from_name("peacock"), Some(Suspect::Peacock));
        assert_eq!(Suspect::from_name("Plum"), Some(Suspect::Plum));
        assert_eq!(Suspect::from_name("Blue"), None);
    }

    #[test]
    fn starting_locations_are_fixed_hallways() {
        assert_eq!(Suspect::Scarlet.starting_location().to_string(), "Hallway_02");
        assert_eq!(Suspect::Mustard.starting_location().to_string(), "Hallway_03");
        assert_eq!(Suspect::White.starting_location().to_string(), "Hallway_12");
        assert_eq!(Suspect::Green.starting_location().to_string(), "Hallway_06");
        assert_eq!(Suspect::Peacock.starting_location().to_string(), "Hallway_07");
        assert_eq!(Suspect::Plum.starting_location().to_string(), "Hallway_08");
    }

    #[test]
    fn starting_locations_are_distinct() {
        let mut starts: Vec<Location> = Suspect::ALL
            .iter()
            .map(|suspect| suspect.starting_location())
            .collect();
        starts.sort();
        starts.dedup();
        assert_eq!(starts.len(), Suspect::ALL.len());
    }
}
