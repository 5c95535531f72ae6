use std::fmt;
use std::str::FromStr;

/// Background choice, stored as the first digit of a career name's code pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Origin {
    #[default]
    None,
    Spacer,
    Colony,
    Earthborn,
}

impl Origin {
    pub fn from_digit(c: char) -> Option<Self> {
        match c {
            '0' => Some(Origin::None),
            '1' => Some(Origin::Spacer),
            '2' => Some(Origin::Colony),
            '3' => Some(Origin::Earthborn),
            _ => None,
        }
    }

    pub fn digit(self) -> char {
        match self {
            Origin::None => '0',
            Origin::Spacer => '1',
            Origin::Colony => '2',
            Origin::Earthborn => '3',
        }
    }
}

/// Notoriety choice, stored as the second digit of a career name's code pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Reputation {
    #[default]
    None,
    Survivor,
    Warhero,
    Ruthless,
}

impl Reputation {
    pub fn from_digit(c: char) -> Option<Self> {
        match c {
            '0' => Some(Reputation::None),
            '1' => Some(Reputation::Survivor),
            '2' => Some(Reputation::Warhero),
            '3' => Some(Reputation::Ruthless),
            _ => None,
        }
    }

    pub fn digit(self) -> char {
        match self {
            Reputation::None => '0',
            Reputation::Survivor => '1',
            Reputation::Warhero => '2',
            Reputation::Ruthless => '3',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerClass {
    Adept,
    Soldier,
    Engineer,
    Sentinel,
    Infiltrator,
    Vanguard,
}

// Friendly-name identifiers as they appear in the record format.
const CLASS_IDS: &[(i32, PlayerClass)] = &[
    (93954, PlayerClass::Adept),
    (93952, PlayerClass::Soldier),
    (93953, PlayerClass::Engineer),
    (93957, PlayerClass::Sentinel),
    (93955, PlayerClass::Infiltrator),
    (93956, PlayerClass::Vanguard),
];

impl PlayerClass {
    pub const ALL: [PlayerClass; 6] = [
        PlayerClass::Adept,
        PlayerClass::Soldier,
        PlayerClass::Engineer,
        PlayerClass::Sentinel,
        PlayerClass::Infiltrator,
        PlayerClass::Vanguard,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PlayerClass::Adept => "Adept",
            PlayerClass::Soldier => "Soldier",
            PlayerClass::Engineer => "Engineer",
            PlayerClass::Sentinel => "Sentinel",
            PlayerClass::Infiltrator => "Infiltrator",
            PlayerClass::Vanguard => "Vanguard",
        }
    }

    pub fn from_class_id(id: i32) -> Option<Self> {
        CLASS_IDS.iter().find(|(k, _)| *k == id).map(|(_, c)| *c)
    }

    pub fn class_id(self) -> i32 {
        CLASS_IDS
            .iter()
            .find(|(_, c)| *c == self)
            .map(|(k, _)| *k)
            .unwrap_or_default()
    }
}

impl fmt::Display for PlayerClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PlayerClass {
    type Err = ();

    /// Case-insensitive match against the six class names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PlayerClass::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}

/// Display fields extracted from a readable save record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSummary {
    pub first_name: String,
    pub origin: Origin,
    pub reputation: Reputation,
    /// Opaque class identifier, see [`PlayerClass::from_class_id`].
    pub class_id: i32,
    /// Identity bytes the career fingerprint is derived from.
    pub fingerprint: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Guid {
    pub a: i32,
    pub b: i32,
    pub c: i32,
    pub d_to_k: [u8; 8],
}

impl Guid {
    /// Bytes in the record format's order: first three groups little-endian.
    pub fn to_bytes_le(&self) -> [u8; 16] {
        let mut out = [0u8; 16];
        out[0..4].copy_from_slice(&self.a.to_le_bytes());
        out[4..6].copy_from_slice(&(self.b as i16).to_le_bytes());
        out[6..8].copy_from_slice(&(self.c as i16).to_le_bytes());
        out[8..16].copy_from_slice(&self.d_to_k);
        out
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:08x}-{:04x}-{:04x}-{:02x}{:02x}-",
            self.a as u32, self.b as u16, self.c as u16, self.d_to_k[0], self.d_to_k[1]
        )?;
        for b in &self.d_to_k[2..] {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

// Parse canonical hyphenated GUID (8-4-4-4-12)
pub fn parse_guid_hyphen(s: &str) -> Result<Guid, String> {
    let parts: Vec<&str> = s.trim().split('-').collect();
    if parts.len() != 5 {
        return Err("invalid guid format".into());
    }
    if parts[0].len() != 8 || parts[1].len() != 4 || parts[2].len() != 4 {
        return Err("bad group length".into());
    }
    if parts[3].len() != 4 || parts[4].len() != 12 {
        return Err("bad d/e or tail".into());
    }
    let p1 = u32::from_str_radix(parts[0], 16).map_err(|_| "bad a")?;
    let p2 = u16::from_str_radix(parts[1], 16).map_err(|_| "bad b")?;
    let p3 = u16::from_str_radix(parts[2], 16).map_err(|_| "bad c")?;
    let tail = format!("{}{}", parts[3], parts[4]);
    let mut d_to_k = [0u8; 8];
    for (i, slot) in d_to_k.iter_mut().enumerate() {
        let off = i * 2;
        *slot = tail
            .get(off..off + 2)
            .and_then(|h| u8::from_str_radix(h, 16).ok())
            .ok_or("bad tail")?;
    }
    Ok(Guid {
        a: p1 as i32,
        b: (p2 as i16) as i32,
        c: (p3 as i16) as i32,
        d_to_k,
    })
}
