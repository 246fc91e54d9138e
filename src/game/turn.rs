use serde::{Deserialize, Serialize};

use crate::enums::{opponent_of, PLAYER_1};

/// 현재 턴 플레이어와 라운드 안에서의 턴 수
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    current_turn: usize,
    turn_count: u32,
}

impl Default for Turn {
    fn default() -> Self {
        Self::new()
    }
}

impl Turn {
    pub fn new() -> Self {
        Turn {
            current_turn: PLAYER_1,
            turn_count: 1,
        }
    }

    pub fn get_turn_count(&self) -> u32 {
        self.turn_count
    }

    pub fn increase_turn_count(&mut self) -> u32 {
        self.turn_count += 1;
        self.turn_count
    }

    /// 라운드가 시작되면 1 부터 다시 셉니다.
    pub fn reset_turn_count(&mut self) {
        self.turn_count = 1;
    }

    pub fn current_turn(&self) -> usize {
        self.current_turn
    }

    pub fn change_turn(&mut self) -> usize {
        self.current_turn = opponent_of(self.current_turn);
        self.current_turn
    }

    pub fn is_turn_of(&self, slot: usize) -> bool {
        self.current_turn == slot
    }

    pub fn get_opponent_turn(&self) -> usize {
        opponent_of(self.current_turn)
    }

    // 특정 플레이어의 턴으로 강제 설정
    pub fn set_turn(&mut self, slot: usize) {
        self.current_turn = slot;
    }
}
