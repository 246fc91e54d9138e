pub mod card;
pub mod catalog;
pub mod condition;
pub mod config;
pub mod effect;
pub mod enums;
pub mod exception;
pub mod game;
pub mod test;
pub mod unit;
pub mod utils;

use once_cell::sync::OnceCell;
use tracing::Level;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

static GUARD: OnceCell<tracing_appender::non_blocking::WorkerGuard> = OnceCell::new();

/// 엔진 로그를 logs/duel.log 에 시간 단위로 남깁니다.
/// 여러 번 호출되어도 한 번만 초기화됩니다.
pub fn setup_logger() {
    GUARD.get_or_init(|| {
        let file_appender = RollingFileAppender::new(Rotation::HOURLY, "logs", "duel.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
            .with_ansi(false)
            .with_file(true)
            .with_line_number(true)
            .with_target(false)
            .with_writer(non_blocking)
            .try_init();

        guard
    });
}

pub trait LogExt<T, E> {
    fn log_ok(self, f: impl FnOnce(&T)) -> Self;
    fn log_err(self, f: impl FnOnce(&E)) -> Self;
}

impl<T, E> LogExt<T, E> for Result<T, E> {
    fn log_ok(self, f: impl FnOnce(&T)) -> Self {
        if let Ok(ref v) = self {
            f(v);
        }
        self
    }

    fn log_err(self, f: impl FnOnce(&E)) -> Self {
        if let Err(ref e) = self {
            f(e);
        }
        self
    }
}
