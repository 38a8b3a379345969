//! GPIO 枚举类型定义
//!
//! 方向、上下拉、中断触发方式以及中断回调类型

use core::ffi::c_void;
use core::fmt;

pub use embedded_hal::digital::PinState;

/// 引脚方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// 输入输出都关闭
    Disabled,
    Input,
    Output,
    /// 开漏输出
    OutputOpenDrain,
    /// 开漏输出，同时保留输入
    InputOutputOpenDrain,
    InputOutput,
}

impl Direction {
    /// 该方向是否需要引脚驱动输出
    pub fn drives_output(self) -> bool {
        !matches!(self, Direction::Disabled | Direction::Input)
    }

    /// 该方向是否打开了输入通路
    pub fn reads_input(self) -> bool {
        matches!(
            self,
            Direction::Input | Direction::InputOutput | Direction::InputOutputOpenDrain
        )
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Disabled => "disabled",
            Direction::Input => "input",
            Direction::Output => "output",
            Direction::OutputOpenDrain => "output-od",
            Direction::InputOutputOpenDrain => "input-output-od",
            Direction::InputOutput => "input-output",
        };
        f.write_str(name)
    }
}

/// 调用者可请求的上拉/下拉
///
/// 没有 "无" 这一项，移除上下拉走 `remove_pull_up_down`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pull {
    Up,
    Down,
}

/// 下发给驱动层的上下拉模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PullMode {
    Up,
    Down,
    Floating,
}

impl From<Pull> for PullMode {
    fn from(pull: Pull) -> Self {
        match pull {
            Pull::Up => PullMode::Up,
            Pull::Down => PullMode::Down,
        }
    }
}

impl fmt::Display for PullMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PullMode::Up => "pull-up",
            PullMode::Down => "pull-down",
            PullMode::Floating => "floating",
        };
        f.write_str(name)
    }
}

/// 中断触发方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InterruptType {
    Disabled,
    RisingEdge,
    FallingEdge,
    AnyEdge,
    LowLevel,
    HighLevel,
}

impl fmt::Display for InterruptType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InterruptType::Disabled => "disabled",
            InterruptType::RisingEdge => "rising-edge",
            InterruptType::FallingEdge => "falling-edge",
            InterruptType::AnyEdge => "any-edge",
            InterruptType::LowLevel => "low-level",
            InterruptType::HighLevel => "high-level",
        };
        f.write_str(name)
    }
}

/// 每个引脚的中断回调
///
/// 在中断上下文执行。注册之后生命周期归驱动的 ISR 服务管理，直到被移除。
pub type IsrHandler = unsafe extern "C" fn(arg: *mut c_void);

/// 不依赖参数内容的中断回调
///
/// 任何参数（包括空指针）都能安全调用，可以通过安全接口注册
pub type IsrCallback = extern "C" fn(arg: *mut c_void);

/// 电平转成 0/1，日志里用
pub fn level_bit(level: PinState) -> u8 {
    match level {
        PinState::Low => 0,
        PinState::High => 1,
    }
}
