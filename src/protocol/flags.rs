// src/protocol/flags.rs
use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};

// SQF_*
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, TryFromPrimitive, IntoPrimitive,
)]
#[repr(u32)]
pub enum QueryFlag {
    Name = 0x0000_0001,
    Url = 0x0000_0002,
    Email = 0x0000_0004,
    MapName = 0x0000_0008,
    MaxClients = 0x0000_0010,
    MaxPlayers = 0x0000_0020,
    Pwads = 0x0000_0040,
    GameType = 0x0000_0080,
    GameName = 0x0000_0100,
    Iwad = 0x0000_0200,
    ForcePassword = 0x0000_0400,
    ForceJoinPassword = 0x0000_0800,
    GameSkill = 0x0000_1000,
    BotSkill = 0x0000_2000,
    DmFlags = 0x0000_4000,
    Limits = 0x0001_0000,
    TeamDamage = 0x0002_0000,
    TeamScores = 0x0004_0000,
    NumPlayers = 0x0008_0000,
    PlayerData = 0x0010_0000,
    TeamInfoNumber = 0x0020_0000,
    TeamInfoName = 0x0040_0000,
    TeamInfoColor = 0x0080_0000,
    TeamInfoScore = 0x0100_0000,
    TestingServer = 0x0200_0000,
    DataMd5Sum = 0x0400_0000,
    AllDmFlags = 0x0800_0000,
    SecuritySettings = 0x1000_0000,
    OptionalWads = 0x2000_0000,
    Deh = 0x4000_0000,
    ExtendedInfo = 0x8000_0000,
}

// SQF2_*, only answered alongside ExtendedInfo.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, TryFromPrimitive, IntoPrimitive,
)]
#[repr(u32)]
pub enum ExtendedFlag {
    PwadHashes = 0x0000_0001,
    Country = 0x0000_0002,
    GameModeName = 0x0000_0004,
    GameModeShortName = 0x0000_0008,
}

pub trait FlagSet: Sized + Copy {
    type Flag: Copy + Into<u32> + TryFrom<u32>;

    fn from_bits_retain(bits: u32) -> Self;
    fn bits(self) -> u32;

    fn empty() -> Self {
        Self::from_bits_retain(0)
    }

    fn combine<I: IntoIterator<Item = Self::Flag>>(flags: I) -> Self {
        Self::from_bits_retain(flags.into_iter().fold(0, |acc, f| acc | Into::<u32>::into(f)))
    }

    // Bits that belong to no member come back as the error value.
    fn decompose(bits: u32) -> Result<Self, u32> {
        let unknown = (0..32)
            .map(|i| 1u32 << i)
            .filter(|bit| bits & bit != 0 && Self::Flag::try_from(*bit).is_err())
            .fold(0u32, |acc, bit| acc | bit);
        if unknown != 0 {
            return Err(unknown);
        }
        Ok(Self::from_bits_retain(bits))
    }

    fn contains(self, flag: Self::Flag) -> bool {
        let bit: u32 = flag.into();
        self.bits() & bit != 0
    }

    fn insert(&mut self, flag: Self::Flag) {
        let bit: u32 = flag.into();
        *self = Self::from_bits_retain(self.bits() | bit);
    }

    fn is_empty(self) -> bool {
        self.bits() == 0
    }

    // Ascending bit order, which is also wire order.
    fn members(self) -> Vec<Self::Flag> {
        let bits = self.bits();
        (0..32)
            .map(|i| 1u32 << i)
            .filter(|bit| bits & bit != 0)
            .filter_map(|bit| Self::Flag::try_from(bit).ok())
            .collect()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryFlags(u32);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtendedFlags(u32);

impl FlagSet for QueryFlags {
    type Flag = QueryFlag;

    fn from_bits_retain(bits: u32) -> Self {
        Self(bits)
    }

    fn bits(self) -> u32 {
        self.0
    }
}

impl FlagSet for ExtendedFlags {
    type Flag = ExtendedFlag;

    fn from_bits_retain(bits: u32) -> Self {
        Self(bits)
    }

    fn bits(self) -> u32 {
        self.0
    }
}

impl FromIterator<QueryFlag> for QueryFlags {
    fn from_iter<I: IntoIterator<Item = QueryFlag>>(iter: I) -> Self {
        Self::combine(iter)
    }
}

impl FromIterator<ExtendedFlag> for ExtendedFlags {
    fn from_iter<I: IntoIterator<Item = ExtendedFlag>>(iter: I) -> Self {
        Self::combine(iter)
    }
}

impl QueryFlags {
    pub fn default_request() -> Self {
        Self::combine([
            QueryFlag::Name,
            QueryFlag::MapName,
            QueryFlag::NumPlayers,
            QueryFlag::PlayerData,
            QueryFlag::GameType,
        ])
    }
}
