//! GPIO 驱动后端抽象
//!
//! 门面只做合法性检查，真正的寄存器操作都经由这个 trait 下发。
//! 目标板上是 `EspBackend`，主机测试用 `SimBackend`。

use core::ffi::c_void;

use super::error::DriverError;
use super::types::{Direction, InterruptType, IsrHandler, PinState, PullMode};

pub trait PinBackend {
    fn set_direction(&mut self, pin: u8, direction: Direction) -> Result<(), DriverError>;

    fn set_level(&mut self, pin: u8, level: PinState) -> Result<(), DriverError>;

    /// 读取瞬时电平，引脚合法时不会失败
    fn get_level(&mut self, pin: u8) -> PinState;

    fn set_pull_mode(&mut self, pin: u8, mode: PullMode) -> Result<(), DriverError>;

    /// 安装按引脚分发的 ISR 服务
    ///
    /// # 参数
    /// * `flags` - 中断分配标志（`ESP_INTR_FLAG_*`）
    fn install_isr_service(&mut self, flags: i32) -> Result<(), DriverError>;

    fn uninstall_isr_service(&mut self);

    fn set_interrupt_type(&mut self, pin: u8, trigger: InterruptType) -> Result<(), DriverError>;

    /// 向 ISR 服务注册引脚回调
    ///
    /// `arg` 原样传给回调，后端不拥有它
    ///
    /// # Safety
    /// 中断分发时会以 `arg` 调用 `handler`。调用者必须保证这样调用是合法的，
    /// 并且 `arg` 在回调被移除或 ISR 服务卸载之前一直有效。
    unsafe fn add_isr_handler(
        &mut self,
        pin: u8,
        handler: IsrHandler,
        arg: *mut c_void,
    ) -> Result<(), DriverError>;

    fn remove_isr_handler(&mut self, pin: u8) -> Result<(), DriverError>;

    fn enable_interrupt(&mut self, pin: u8) -> Result<(), DriverError>;

    fn disable_interrupt(&mut self, pin: u8) -> Result<(), DriverError>;
}
