//! ESP32 GPIO 驱动封装
//!
//! 在 ESP-IDF GPIO 驱动之上做引脚编号、方向和上下拉的合法性检查，
//! 按需输出诊断日志。

#[macro_use]
mod macros;

pub mod config;
pub mod gpio;

#[doc(hidden)]
pub use log as __log;

pub use config::{DelegatePolicy, GpioConfig, PinCapabilities};
pub use gpio::{Direction, GpioError, GpioFacade, InterruptType, PinBackend, PinState, Pull};
