//! GPIO 门面模块
//!
//! 校验引脚编号与能力后转发给驱动后端

pub mod backend;
pub mod error;
#[cfg(target_os = "espidf")]
pub mod esp;
pub mod facade;
pub mod sim;
pub mod types;

/// GPIO 诊断日志使用的 target
pub const LOG_TARGET: &str = "esp32_gpio";

// 重新导出常用类型
pub use backend::PinBackend;
pub use error::{DriverError, GpioError};
#[cfg(target_os = "espidf")]
pub use esp::EspBackend;
pub use facade::GpioFacade;
pub use sim::SimBackend;
pub use types::{Direction, InterruptType, IsrCallback, IsrHandler, PinState, Pull, PullMode};
