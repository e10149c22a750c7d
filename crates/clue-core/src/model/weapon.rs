use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Weapon {
    Knife = 0,
    Wrench = 1,
    Revolver = 2,
    Pipe = 3,
    Rope = 4,
    Candlestick = 5,
}

impl Weapon {
    pub const ALL: [Weapon; 6] = [
        Weapon::Knife,
        Weapon::Wrench,
        Weapon::Revolver,
        Weapon::Pipe,
        Weapon::Rope,
        Weapon::Candlestick,
    ];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Weapon::Knife),
            1 => Some(Weapon::Wrench),
            2 => Some(Weapon::Revolver),
            3 => Some(Weapon::Pipe),
            4 => Some(Weapon::Rope),
            5 => Some(Weapon::Candlestick),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_name(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "knife" => Some(Weapon::Knife),
            "wrench" => Some(Weapon::Wrench),
            "revolver" => Some(Weapon::Revolver),
            "pipe" => Some(Weapon::Pipe),
            "rope" => Some(Weapon::Rope),
            "candlestick" => Some(Weapon::Candlestick),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Weapon::Knife => "Knife",
            Weapon::Wrench => "Wrench",
            Weapon::Revolver => "Revolver",
            Weapon::Pipe => "Pipe",
            Weapon::Rope => "Rope",
            Weapon::Candlestick => "Candlestick",
        }
    }
}

impl fmt::Display for Weapon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
