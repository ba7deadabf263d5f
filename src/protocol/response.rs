// src/protocol/response.rs
//! Launcher response walker.
//!
//! After the fixed header (`code`, `query_time`, `version`, `flags`) the body
//! is a sequence of optional groups. Which groups are present is decided by
//! the flag words alone, and they always appear in ascending bit order. The
//! tables below pair every flag with its reader in that order.

use log::debug;

use super::cursor::ByteCursor;
use super::flags::{ExtendedFlag, ExtendedFlags, FlagSet, QueryFlag, QueryFlags};
use super::huffman;
use crate::error::{DecodeError, QueryError};
use crate::models::server::{
    DmFlags, ExtendedInfo, GameMode, GameType, Limits, Player, ResponseCode, ServerStatus,
    TeamScores, TestingServer,
};
use crate::utils::strip_color_codes;

type DecodeStep = fn(&mut ByteCursor<'_>, &mut ServerStatus) -> Result<(), DecodeError>;
type ExtendedStep = fn(&mut ByteCursor<'_>, &mut ExtendedInfo) -> Result<(), DecodeError>;

const BASE_GROUPS: &[(QueryFlag, DecodeStep)] = &[
    (QueryFlag::Name, read_name),
    (QueryFlag::Url, read_url),
    (QueryFlag::Email, read_email),
    (QueryFlag::MapName, read_map_name),
    (QueryFlag::MaxClients, read_max_clients),
    (QueryFlag::MaxPlayers, read_max_players),
    (QueryFlag::Pwads, read_pwads),
    (QueryFlag::GameType, read_game_type),
    (QueryFlag::GameName, read_game_name),
    (QueryFlag::Iwad, read_iwad),
    (QueryFlag::ForcePassword, read_force_password),
    (QueryFlag::ForceJoinPassword, read_force_join_password),
    (QueryFlag::GameSkill, read_game_skill),
    (QueryFlag::BotSkill, read_bot_skill),
    (QueryFlag::DmFlags, read_dmflags),
    (QueryFlag::Limits, read_limits),
    (QueryFlag::TeamDamage, read_team_damage),
    (QueryFlag::TeamScores, read_team_scores),
    (QueryFlag::NumPlayers, read_num_players),
    (QueryFlag::PlayerData, read_players),
    (QueryFlag::TeamInfoNumber, read_team_count),
    (QueryFlag::TeamInfoName, read_team_names),
    (QueryFlag::TeamInfoColor, read_team_colors),
    (QueryFlag::TeamInfoScore, read_team_scores_list),
    (QueryFlag::TestingServer, read_testing_server),
    (QueryFlag::DataMd5Sum, read_data_md5sum),
    (QueryFlag::AllDmFlags, read_all_dmflags),
    (QueryFlag::SecuritySettings, read_security_settings),
    (QueryFlag::OptionalWads, read_optional_wads),
    (QueryFlag::Deh, read_deh),
    (QueryFlag::ExtendedInfo, read_extended_info),
];

const EXTENDED_GROUPS: &[(ExtendedFlag, ExtendedStep)] = &[
    (ExtendedFlag::PwadHashes, read_pwad_hashes),
    (ExtendedFlag::Country, read_country),
    (ExtendedFlag::GameModeName, read_game_mode_name),
    (ExtendedFlag::GameModeShortName, read_game_mode_short_name),
];

pub fn decode_datagram(datagram: &[u8]) -> Result<ServerStatus, QueryError> {
    let plain = huffman::decode(datagram)?;
    Ok(parse_response(&plain)?)
}

// A code other than "accepted" is not an error; the status carries only the code.
pub fn parse_response(plain: &[u8]) -> Result<ServerStatus, DecodeError> {
    let mut cursor = ByteCursor::new(plain);

    let response_code = ResponseCode::from(cursor.next_long()?);
    let mut status = ServerStatus::new(response_code);
    if response_code != ResponseCode::Accepted {
        debug!("Server answered with {:?}, nothing further to read", response_code);
        return Ok(status);
    }

    status.query_time = Some(cursor.next_long()?);
    status.version = Some(cursor.next_string()?);

    let flags = QueryFlags::decompose(cursor.next_long()?).map_err(DecodeError::UnknownFlags)?;
    status.response_flags = Some(flags);

    for (flag, step) in BASE_GROUPS {
        if flags.contains(*flag) {
            step(&mut cursor, &mut status)?;
        }
    }

    if cursor.remaining() > 0 {
        debug!(
            "Ignoring {} trailing bytes after offset {}",
            cursor.remaining(),
            cursor.position()
        );
    }
    Ok(status)
}

fn read_counted<T>(
    cursor: &mut ByteCursor<'_>,
    count: usize,
    mut read: impl FnMut(&mut ByteCursor<'_>) -> Result<T, DecodeError>,
) -> Result<Vec<T>, DecodeError> {
    (0..count).map(|_| read(cursor)).collect()
}

fn read_string_list(cursor: &mut ByteCursor<'_>) -> Result<Vec<String>, DecodeError> {
    let count = cursor.next_byte()? as usize;
    read_counted(cursor, count, |c| c.next_string())
}

fn read_name(cursor: &mut ByteCursor<'_>, status: &mut ServerStatus) -> Result<(), DecodeError> {
    let raw = cursor.next_cstring()?;
    status.name = Some(strip_color_codes(raw));
    status.name_formatted = Some(String::from_utf8_lossy(raw).into_owned());
    Ok(())
}

fn read_url(cursor: &mut ByteCursor<'_>, status: &mut ServerStatus) -> Result<(), DecodeError> {
    status.url = Some(cursor.next_string()?);
    Ok(())
}

fn read_email(cursor: &mut ByteCursor<'_>, status: &mut ServerStatus) -> Result<(), DecodeError> {
    status.email = Some(cursor.next_string()?);
    Ok(())
}

fn read_map_name(cursor: &mut ByteCursor<'_>, status: &mut ServerStatus) -> Result<(), DecodeError> {
    status.map_name = Some(cursor.next_string()?);
    Ok(())
}

fn read_max_clients(cursor: &mut ByteCursor<'_>, status: &mut ServerStatus) -> Result<(), DecodeError> {
    status.max_clients = Some(cursor.next_byte()?);
    Ok(())
}

fn read_max_players(cursor: &mut ByteCursor<'_>, status: &mut ServerStatus) -> Result<(), DecodeError> {
    status.max_players = Some(cursor.next_byte()?);
    Ok(())
}

fn read_pwads(cursor: &mut ByteCursor<'_>, status: &mut ServerStatus) -> Result<(), DecodeError> {
    status.pwads = Some(read_string_list(cursor)?);
    Ok(())
}

fn read_game_type(cursor: &mut ByteCursor<'_>, status: &mut ServerStatus) -> Result<(), DecodeError> {
    let raw = cursor.next_byte()?;
    let game_type = GameType::try_from(raw).map_err(|_| DecodeError::UnknownGameType(raw))?;
    let instagib = cursor.next_byte()? != 0;
    let buckshot = cursor.next_byte()? != 0;
    status.game_mode = Some(GameMode { game_type, instagib, buckshot });
    Ok(())
}

fn read_game_name(cursor: &mut ByteCursor<'_>, status: &mut ServerStatus) -> Result<(), DecodeError> {
    status.game_name = Some(cursor.next_string()?);
    Ok(())
}

fn read_iwad(cursor: &mut ByteCursor<'_>, status: &mut ServerStatus) -> Result<(), DecodeError> {
    status.iwad = Some(cursor.next_string()?);
    Ok(())
}

fn read_force_password(cursor: &mut ByteCursor<'_>, status: &mut ServerStatus) -> Result<(), DecodeError> {
    status.force_password = Some(cursor.next_byte()? != 0);
    Ok(())
}

fn read_force_join_password(
    cursor: &mut ByteCursor<'_>,
    status: &mut ServerStatus,
) -> Result<(), DecodeError> {
    status.force_join_password = Some(cursor.next_byte()? != 0);
    Ok(())
}

fn read_game_skill(cursor: &mut ByteCursor<'_>, status: &mut ServerStatus) -> Result<(), DecodeError> {
    status.game_skill = Some(cursor.next_byte()?);
    Ok(())
}

fn read_bot_skill(cursor: &mut ByteCursor<'_>, status: &mut ServerStatus) -> Result<(), DecodeError> {
    status.bot_skill = Some(cursor.next_byte()?);
    Ok(())
}

fn read_dmflags(cursor: &mut ByteCursor<'_>, status: &mut ServerStatus) -> Result<(), DecodeError> {
    status.dmflags = Some(DmFlags {
        dmflags: cursor.next_long()?,
        dmflags2: cursor.next_long()?,
        compatflags: cursor.next_long()?,
    });
    Ok(())
}

fn read_limits(cursor: &mut ByteCursor<'_>, status: &mut ServerStatus) -> Result<(), DecodeError> {
    let fraglimit = cursor.next_short()?;
    let timelimit = cursor.next_short()?;
    let timeleft = if timelimit > 0 {
        Some(cursor.next_short()?)
    } else {
        None
    };
    status.limits = Some(Limits {
        fraglimit,
        timelimit,
        timeleft,
        duellimit: cursor.next_short()?,
        pointlimit: cursor.next_short()?,
        winlimit: cursor.next_short()?,
    });
    Ok(())
}

fn read_team_damage(cursor: &mut ByteCursor<'_>, status: &mut ServerStatus) -> Result<(), DecodeError> {
    status.team_damage = Some(cursor.next_float()?);
    Ok(())
}

fn read_team_scores(cursor: &mut ByteCursor<'_>, status: &mut ServerStatus) -> Result<(), DecodeError> {
    status.team_scores = Some(TeamScores {
        blue: cursor.next_short()?,
        red: cursor.next_short()?,
    });
    Ok(())
}

fn read_num_players(cursor: &mut ByteCursor<'_>, status: &mut ServerStatus) -> Result<(), DecodeError> {
    status.num_players = Some(cursor.next_byte()?);
    Ok(())
}

fn read_players(cursor: &mut ByteCursor<'_>, status: &mut ServerStatus) -> Result<(), DecodeError> {
    let count = status.num_players.ok_or(DecodeError::MissingField("player count"))?;
    let game_type = status.game_type().ok_or(DecodeError::MissingField("game type"))?;
    let team_game = game_type.is_team_game();

    let players = read_counted(cursor, count as usize, |c| read_player(c, team_game))?;
    status.players = Some(players);
    Ok(())
}

fn read_player(cursor: &mut ByteCursor<'_>, team_game: bool) -> Result<Player, DecodeError> {
    let raw_name = cursor.next_cstring()?;
    let frags = cursor.next_short()?;
    let ping = cursor.next_ushort()?;
    let spectator = cursor.next_byte()? != 0;
    let bot = cursor.next_byte()? != 0;
    let team = if team_game {
        Some(cursor.next_byte()?)
    } else {
        None
    };
    let time_on_server = cursor.next_byte()?;
    Ok(Player {
        name: strip_color_codes(raw_name),
        name_formatted: String::from_utf8_lossy(raw_name).into_owned(),
        frags,
        ping,
        spectator,
        bot,
        team,
        time_on_server,
    })
}

fn team_count(status: &ServerStatus) -> Result<usize, DecodeError> {
    status
        .team_info
        .count
        .map(usize::from)
        .ok_or(DecodeError::MissingField("team count"))
}

fn read_team_count(cursor: &mut ByteCursor<'_>, status: &mut ServerStatus) -> Result<(), DecodeError> {
    status.team_info.count = Some(cursor.next_byte()?);
    Ok(())
}

fn read_team_names(cursor: &mut ByteCursor<'_>, status: &mut ServerStatus) -> Result<(), DecodeError> {
    let count = team_count(status)?;
    status.team_info.names = Some(read_counted(cursor, count, |c| c.next_string())?);
    Ok(())
}

fn read_team_colors(cursor: &mut ByteCursor<'_>, status: &mut ServerStatus) -> Result<(), DecodeError> {
    let count = team_count(status)?;
    status.team_info.colors = Some(read_counted(cursor, count, |c| c.next_long())?);
    Ok(())
}

fn read_team_scores_list(
    cursor: &mut ByteCursor<'_>,
    status: &mut ServerStatus,
) -> Result<(), DecodeError> {
    let count = team_count(status)?;
    status.team_info.scores = Some(read_counted(cursor, count, |c| c.next_short())?);
    Ok(())
}

fn read_testing_server(cursor: &mut ByteCursor<'_>, status: &mut ServerStatus) -> Result<(), DecodeError> {
    status.testing_server = Some(TestingServer {
        enabled: cursor.next_byte()? != 0,
        binary: cursor.next_string()?,
    });
    Ok(())
}

fn read_data_md5sum(cursor: &mut ByteCursor<'_>, status: &mut ServerStatus) -> Result<(), DecodeError> {
    status.data_md5sum = Some(cursor.next_string()?);
    Ok(())
}

fn read_all_dmflags(cursor: &mut ByteCursor<'_>, status: &mut ServerStatus) -> Result<(), DecodeError> {
    let count = cursor.next_byte()? as usize;
    status.all_dmflags = Some(read_counted(cursor, count, |c| c.next_long())?);
    Ok(())
}

fn read_security_settings(
    cursor: &mut ByteCursor<'_>,
    status: &mut ServerStatus,
) -> Result<(), DecodeError> {
    status.security_settings = Some(cursor.next_byte()?);
    Ok(())
}

fn read_optional_wads(cursor: &mut ByteCursor<'_>, status: &mut ServerStatus) -> Result<(), DecodeError> {
    let count = cursor.next_byte()? as usize;
    status.optional_wads = Some(read_counted(cursor, count, |c| c.next_byte())?);
    Ok(())
}

fn read_deh(cursor: &mut ByteCursor<'_>, status: &mut ServerStatus) -> Result<(), DecodeError> {
    status.deh = Some(read_string_list(cursor)?);
    Ok(())
}

fn read_extended_info(cursor: &mut ByteCursor<'_>, status: &mut ServerStatus) -> Result<(), DecodeError> {
    let flags = ExtendedFlags::decompose(cursor.next_long()?).map_err(DecodeError::UnknownFlags)?;
    let mut extended = ExtendedInfo { flags, ..ExtendedInfo::default() };
    for (flag, step) in EXTENDED_GROUPS {
        if flags.contains(*flag) {
            step(cursor, &mut extended)?;
        }
    }
    status.extended = Some(extended);
    Ok(())
}

fn read_pwad_hashes(cursor: &mut ByteCursor<'_>, extended: &mut ExtendedInfo) -> Result<(), DecodeError> {
    extended.pwad_hashes = Some(read_string_list(cursor)?);
    Ok(())
}

fn read_country(cursor: &mut ByteCursor<'_>, extended: &mut ExtendedInfo) -> Result<(), DecodeError> {
    extended.country = Some(String::from_utf8_lossy(cursor.next_bytes(3)?).into_owned());
    Ok(())
}

fn read_game_mode_name(cursor: &mut ByteCursor<'_>, extended: &mut ExtendedInfo) -> Result<(), DecodeError> {
    extended.game_mode_name = Some(cursor.next_string()?);
    Ok(())
}

fn read_game_mode_short_name(
    cursor: &mut ByteCursor<'_>,
    extended: &mut ExtendedInfo,
) -> Result<(), DecodeError> {
    extended.game_mode_short_name = Some(cursor.next_string()?);
    Ok(())
}
