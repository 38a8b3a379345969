//! GPIO 配置模块
//!
//! 提供芯片引脚能力表、演示板引脚分配和门面运行配置

pub mod pins;
pub mod settings;

// 重新导出常用类型
pub use pins::PinCapabilities;
pub use settings::{DelegatePolicy, GpioConfig};
