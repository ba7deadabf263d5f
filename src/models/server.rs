// src/models/server.rs
use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};

use crate::protocol::flags::{ExtendedFlags, QueryFlags};

pub const RESPONSE_ACCEPTED: u32 = 5660023;
pub const RESPONSE_DENIED: u32 = 5660024;
pub const RESPONSE_BANNED: u32 = 5660025;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseCode {
    Accepted,
    // Queried again within the server's ignore window.
    Denied,
    Banned,
    Unknown(u32),
}

impl From<u32> for ResponseCode {
    fn from(code: u32) -> Self {
        match code {
            RESPONSE_ACCEPTED => Self::Accepted,
            RESPONSE_DENIED => Self::Denied,
            RESPONSE_BANNED => Self::Banned,
            other => Self::Unknown(other),
        }
    }
}

impl From<ResponseCode> for u32 {
    fn from(code: ResponseCode) -> Self {
        match code {
            ResponseCode::Accepted => RESPONSE_ACCEPTED,
            ResponseCode::Denied => RESPONSE_DENIED,
            ResponseCode::Banned => RESPONSE_BANNED,
            ResponseCode::Unknown(other) => other,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TryFromPrimitive, IntoPrimitive,
)]
#[repr(u8)]
pub enum GameType {
    Cooperative = 0,
    Survival = 1,
    Invasion = 2,
    Deathmatch = 3,
    Teamplay = 4,
    Duel = 5,
    Terminator = 6,
    LastManStanding = 7,
    TeamLms = 8,
    Possession = 9,
    TeamPossession = 10,
    TeamGame = 11,
    Ctf = 12,
    OneFlagCtf = 13,
    Skulltag = 14,
    Domination = 15,
}

impl GameType {
    pub fn is_team_game(self) -> bool {
        matches!(
            self,
            Self::Teamplay
                | Self::TeamLms
                | Self::TeamPossession
                | Self::TeamGame
                | Self::Ctf
                | Self::OneFlagCtf
                | Self::Skulltag
                | Self::Domination
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameMode {
    pub game_type: GameType,
    pub instagib: bool,
    pub buckshot: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DmFlags {
    pub dmflags: u32,
    pub dmflags2: u32,
    pub compatflags: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limits {
    pub fraglimit: i16,
    pub timelimit: i16,
    // Only sent while a time limit is running.
    pub timeleft: Option<i16>,
    pub duellimit: i16,
    pub pointlimit: i16,
    pub winlimit: i16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamScores {
    pub blue: i16,
    pub red: i16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub name_formatted: String,
    pub frags: i16,
    pub ping: u16,
    pub spectator: bool,
    pub bot: bool,
    pub team: Option<u8>,
    pub time_on_server: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamInfo {
    pub count: Option<u8>,
    pub names: Option<Vec<String>>,
    pub colors: Option<Vec<u32>>,
    pub scores: Option<Vec<i16>>,
}

impl TeamInfo {
    pub fn is_empty(&self) -> bool {
        self.count.is_none() && self.names.is_none() && self.colors.is_none() && self.scores.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestingServer {
    pub enabled: bool,
    pub binary: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtendedInfo {
    pub flags: ExtendedFlags,
    pub pwad_hashes: Option<Vec<String>>,
    pub country: Option<String>,
    pub game_mode_name: Option<String>,
    pub game_mode_short_name: Option<String>,
}

// Every group is `None` unless its bit was set in the response flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerStatus {
    pub response_code: ResponseCode,
    pub query_time: Option<u32>,
    pub version: Option<String>,
    pub response_flags: Option<QueryFlags>,

    pub name: Option<String>,
    pub name_formatted: Option<String>,
    pub url: Option<String>,
    pub email: Option<String>,
    pub map_name: Option<String>,
    pub max_clients: Option<u8>,
    pub max_players: Option<u8>,
    pub pwads: Option<Vec<String>>,
    pub game_mode: Option<GameMode>,
    pub game_name: Option<String>,
    pub iwad: Option<String>,
    pub force_password: Option<bool>,
    pub force_join_password: Option<bool>,
    pub game_skill: Option<u8>,
    pub bot_skill: Option<u8>,
    pub dmflags: Option<DmFlags>,
    pub limits: Option<Limits>,
    pub team_damage: Option<f32>,
    pub team_scores: Option<TeamScores>,
    pub num_players: Option<u8>,
    pub players: Option<Vec<Player>>,
    #[serde(skip_serializing_if = "TeamInfo::is_empty", default)]
    pub team_info: TeamInfo,
    pub testing_server: Option<TestingServer>,
    pub data_md5sum: Option<String>,
    pub all_dmflags: Option<Vec<u32>>,
    pub security_settings: Option<u8>,
    // Indices into `pwads`.
    pub optional_wads: Option<Vec<u8>>,
    pub deh: Option<Vec<String>>,
    pub extended: Option<ExtendedInfo>,
}

impl ServerStatus {
    pub fn new(response_code: ResponseCode) -> Self {
        Self {
            response_code,
            query_time: None,
            version: None,
            response_flags: None,
            name: None,
            name_formatted: None,
            url: None,
            email: None,
            map_name: None,
            max_clients: None,
            max_players: None,
            pwads: None,
            game_mode: None,
            game_name: None,
            iwad: None,
            force_password: None,
            force_join_password: None,
            game_skill: None,
            bot_skill: None,
            dmflags: None,
            limits: None,
            team_damage: None,
            team_scores: None,
            num_players: None,
            players: None,
            team_info: TeamInfo::default(),
            testing_server: None,
            data_md5sum: None,
            all_dmflags: None,
            security_settings: None,
            optional_wads: None,
            deh: None,
            extended: None,
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.response_code == ResponseCode::Accepted
    }

    pub fn game_type(&self) -> Option<GameType> {
        self.game_mode.map(|mode| mode.game_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_codes_classify() {
        assert_eq!(ResponseCode::from(5660023), ResponseCode::Accepted);
        assert_eq!(ResponseCode::from(5660024), ResponseCode::Denied);
        assert_eq!(ResponseCode::from(5660025), ResponseCode::Banned);
        assert_eq!(ResponseCode::from(42), ResponseCode::Unknown(42));
        assert_eq!(u32::from(ResponseCode::Banned), 5660025);
    }

    #[test]
    fn team_game_types() {
        let team: Vec<u8> = (0..=15u8)
            .filter(|&raw| GameType::try_from(raw).map(GameType::is_team_game).unwrap_or(false))
            .collect();
        assert_eq!(team, vec![4, 8, 10, 11, 12, 13, 14, 15]);
        assert!(GameType::try_from(16u8).is_err());
    }
}
