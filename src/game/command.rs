use serde::{Deserialize, Serialize};
use tracing::{error, info};

use super::{action::TargetInfo, resolve::ResolvePayload, Game};
use crate::{exception::CommandResponse, LogExt};

/// 전송 계층에서 받는 플레이어 명령
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum ClientCommand {
    PlayCard {
        card_index: usize,
        #[serde(default)]
        target: Option<TargetInfo>,
    },
    SelectTactics {
        card_index: usize,
    },
    UseTactics {
        card_index: usize,
    },
    EndTurn,
    ResolveAction {
        #[serde(flatten)]
        payload: ResolvePayload,
    },
}

impl ClientCommand {
    pub fn name(&self) -> &'static str {
        match self {
            ClientCommand::PlayCard { .. } => "PLAY_CARD",
            ClientCommand::SelectTactics { .. } => "SELECT_TACTICS",
            ClientCommand::UseTactics { .. } => "USE_TACTICS",
            ClientCommand::EndTurn => "END_TURN",
            ClientCommand::ResolveAction { .. } => "RESOLVE_ACTION",
        }
    }
}

impl Game {
    /// 명령 하나를 실행하고 전송용 응답으로 바꿉니다.
    pub fn dispatch(&mut self, player_id: &str, command: ClientCommand) -> CommandResponse {
        let name = command.name();
        let result = match command {
            ClientCommand::PlayCard { card_index, target } => {
                self.play_card(player_id, card_index, target)
            }
            ClientCommand::SelectTactics { card_index } => {
                self.select_tactics(player_id, card_index)
            }
            ClientCommand::UseTactics { card_index } => self.use_tactics(player_id, card_index),
            ClientCommand::EndTurn => self.end_turn(player_id),
            ClientCommand::ResolveAction { payload } => self.resolve_action(player_id, payload),
        }
        .log_ok(|outcome| info!("명령 처리 완료: player={}, command={}, outcome={:?}", player_id, name, outcome))
        .log_err(|e| error!("명령 거절: player={}, command={}, reason={}", player_id, name, e));

        CommandResponse::from(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tagged_commands() {
        let command: ClientCommand = serde_json::from_str(
            r#"{"type":"PLAY_CARD","cardIndex":2,"target":{"attackerIndex":0,"targetIndex":1}}"#,
        )
        .unwrap();
        assert_eq!(
            command,
            ClientCommand::PlayCard {
                card_index: 2,
                target: Some(TargetInfo::attack(0, 1)),
            }
        );

        let command: ClientCommand =
            serde_json::from_str(r#"{"type":"RESOLVE_ACTION","targetIndex":2}"#).unwrap();
        assert_eq!(
            command,
            ClientCommand::ResolveAction {
                payload: ResolvePayload::target(2)
            }
        );

        let command: ClientCommand = serde_json::from_str(r#"{"type":"END_TURN"}"#).unwrap();
        assert_eq!(command.name(), "END_TURN");
    }
}
