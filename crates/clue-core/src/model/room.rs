use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Room {
    Study = 0,
    Hall = 1,
    Lounge = 2,
    Library = 3,
    Billiard = 4,
    Dining = 5,
    Conservatory = 6,
    Ballroom = 7,
    Kitchen = 8,
}

impl Room {
    pub const ALL: [Room; 9] = [
        Room::Study,
        Room::Hall,
        Room::Lounge,
        Room::Library,
        Room::Billiard,
        Room::Dining,
        Room::Conservatory,
        Room::Ballroom,
        Room::Kitchen,
    ];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Room::Study),
            1 => Some(Room::Hall),
            2 => Some(Room::Lounge),
            3 => Some(Room::Library),
            4 => Some(Room::Billiard),
            5 => Some(Room::Dining),
            6 => Some(Room::Conservatory),
            7 => Some(Room::Ballroom),
            8 => Some(Room::Kitchen),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_name(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "study" => Some(Room::Study),
            "hall" => Some(Room::Hall),
            "lounge" => Some(Room::Lounge),
            "library" => Some(Room::Library),
            "billiard" => Some(Room::Billiard),
            "dining" => Some(Room::Dining),
            "conservatory" => Some(Room::Conservatory),
            "ballroom" => Some(Room::Ballroom),
            "kitchen" => Some(Room::Kitchen),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Room::Study => "Study",
            Room::Hall => "Hall",
            Room::Lounge => "Lounge",
            Room::Library => "Library",
            Room::Billiard => "Billiard",
            Room::Dining => "Dining",
            Room::Conservatory => "Conservatory",
            Room::Ballroom => "Ballroom",
            Room::Kitchen => "Kitchen",
        }
    }

    /// Corner rooms joined by a secret passage.
    pub const fn secret_passage(self) -> Option<Room> {
        match self {
            Room::Study => Some(Room::Kitchen),
            Room::Kitchen => Some(Room::Study),
            Room::Lounge => Some(Room::Conservatory),
            Room::Conservatory => Some(Room::Lounge),
            _ => None,
        }
    }
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::Room;

    #[test]
    fn secret_passages_are_symmetric() {
        for room in Room::ALL {
            if let Some(other) = room.secret_passage() {
                assert_eq!(other.secret_passage(), Some(room));
            }
        }
        assert_eq!(Room::Hall.secret_passage(), None);
    }

    #[test]
    fn from_name_ignores_case_and_padding() {
        assert_eq!(Room::from_name(" ballroom "), Some(Room::Ballroom));
        assert_eq!(Room::from_name("Cellar"), None);
    }
}
