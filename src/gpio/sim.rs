//! 内存中的 ESP32 GPIO 外设模拟
//!
//! 记录每一次驱动调用，支持注入失败、回环读电平以及软件触发中断，
//! 用于主机上测试门面和运行演示程序。

use core::ffi::c_void;
use std::collections::{HashMap, HashSet};

use super::backend::PinBackend;
use super::error::{DriverError, ESP_ERR_INVALID_STATE, ESP_FAIL};
use super::types::{Direction, InterruptType, IsrHandler, PinState, PullMode};

/// 一次驱动调用的记录
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendCall {
    SetDirection(u8, Direction),
    SetLevel(u8, PinState),
    GetLevel(u8),
    SetPullMode(u8, PullMode),
    InstallIsrService(i32),
    UninstallIsrService,
    SetInterruptType(u8, InterruptType),
    AddIsrHandler(u8),
    RemoveIsrHandler(u8),
    EnableInterrupt(u8),
    DisableInterrupt(u8),
}

/// 可以注入失败的驱动调用
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendOp {
    SetDirection,
    SetLevel,
    SetPullMode,
    InstallIsrService,
    SetInterruptType,
    AddIsrHandler,
    RemoveIsrHandler,
    EnableInterrupt,
    DisableInterrupt,
}

impl BackendOp {
    /// 对应的 ESP-IDF 函数名
    pub fn name(self) -> &'static str {
        match self {
            BackendOp::SetDirection => "gpio_set_direction",
            BackendOp::SetLevel => "gpio_set_level",
            BackendOp::SetPullMode => "gpio_set_pull_mode",
            BackendOp::InstallIsrService => "gpio_install_isr_service",
            BackendOp::SetInterruptType => "gpio_set_intr_type",
            BackendOp::AddIsrHandler => "gpio_isr_handler_add",
            BackendOp::RemoveIsrHandler => "gpio_isr_handler_remove",
            BackendOp::EnableInterrupt => "gpio_intr_enable",
            BackendOp::DisableInterrupt => "gpio_intr_disable",
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct SimPin {
    direction: Direction,
    /// 输出锁存值
    latch: PinState,
    /// 外部驱动到引脚上的电平
    external: PinState,
    pull: PullMode,
    trigger: InterruptType,
    handler: Option<(IsrHandler, *mut c_void)>,
    intr_enabled: bool,
}

impl Default for SimPin {
    fn default() -> Self {
        Self {
            direction: Direction::Disabled,
            latch: PinState::Low,
            external: PinState::Low,
            pull: PullMode::Floating,
            trigger: InterruptType::Disabled,
            handler: None,
            intr_enabled: false,
        }
    }
}

/// 模拟 GPIO 后端
#[derive(Debug, Default)]
pub struct SimBackend {
    pins: HashMap<u8, SimPin>,
    isr_installed: bool,
    calls: Vec<BackendCall>,
    failures: HashSet<BackendOp>,
    /// 按 ESP32 硬件读电平：只有打开输入通路的引脚才能读回输出
    strict_readback: bool,
}

impl SimBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// 按真实 ESP32 的方式读电平
    ///
    /// `gpio_get_level` 读的是输入寄存器，纯 `Output` 方向的引脚读到低电平
    pub fn with_strict_readback() -> Self {
        Self {
            strict_readback: true,
            ..Self::default()
        }
    }

    /// 到目前为止的全部驱动调用
    pub fn calls(&self) -> &[BackendCall] {
        &self.calls
    }

    /// 取出并清空调用记录
    pub fn take_calls(&mut self) -> Vec<BackendCall> {
        std::mem::take(&mut self.calls)
    }

    /// 之后对 `op` 的调用都返回 `ESP_FAIL`，直到 [`SimBackend::recover`]
    pub fn fail(&mut self, op: BackendOp) {
        self.failures.insert(op);
    }

    pub fn recover(&mut self, op: BackendOp) {
        self.failures.remove(&op);
    }

    pub fn direction(&self, pin: u8) -> Direction {
        self.pin(pin).direction
    }

    pub fn output_latch(&self, pin: u8) -> PinState {
        self.pin(pin).latch
    }

    pub fn pull_mode(&self, pin: u8) -> PullMode {
        self.pin(pin).pull
    }

    pub fn interrupt_type(&self, pin: u8) -> InterruptType {
        self.pin(pin).trigger
    }

    pub fn has_handler(&self, pin: u8) -> bool {
        self.pin(pin).handler.is_some()
    }

    pub fn is_interrupt_enabled(&self, pin: u8) -> bool {
        self.pin(pin).intr_enabled
    }

    pub fn is_isr_service_installed(&self) -> bool {
        self.isr_installed
    }

    /// 从外部把引脚驱动到 `level`，满足触发条件时分发中断
    ///
    /// # 返回
    /// * `true` - 回调被调用
    pub fn drive_input(&mut self, pin: u8, level: PinState) -> bool {
        let state = self.pins.entry(pin).or_default();
        let previous = state.external;
        state.external = level;

        let fires = match state.trigger {
            InterruptType::Disabled => false,
            InterruptType::RisingEdge => previous == PinState::Low && level == PinState::High,
            InterruptType::FallingEdge => previous == PinState::High && level == PinState::Low,
            InterruptType::AnyEdge => previous != level,
            InterruptType::LowLevel => level == PinState::Low,
            InterruptType::HighLevel => level == PinState::High,
        };
        fires && self.dispatch(pin)
    }

    /// 直接分发一次中断，不检查触发条件
    ///
    /// 需要 ISR 服务已安装、中断已使能且已注册回调
    pub fn trigger(&mut self, pin: u8) -> bool {
        self.dispatch(pin)
    }

    fn dispatch(&self, pin: u8) -> bool {
        if !self.isr_installed {
            return false;
        }
        let state = self.pin(pin);
        match state.handler {
            Some((handler, arg)) if state.intr_enabled => {
                log::trace!("sim: dispatch isr on GPIO{pin}");
                // SAFETY: add_isr_handler 的调用者保证回调和参数在移除前一直有效
                unsafe { handler(arg) };
                true
            }
            _ => false,
        }
    }

    fn pin(&self, pin: u8) -> SimPin {
        self.pins.get(&pin).copied().unwrap_or_default()
    }

    fn record(&mut self, call: BackendCall) {
        log::trace!("sim: {call:?}");
        self.calls.push(call);
    }

    /// 记录调用，并按注入的失败返回 `ESP_FAIL`
    fn record_op(&mut self, call: BackendCall, op: BackendOp) -> Result<(), DriverError> {
        self.record(call);
        if self.failures.contains(&op) {
            Err(DriverError::new(op.name(), ESP_FAIL))
        } else {
            Ok(())
        }
    }
}

impl PinBackend for SimBackend {
    fn set_direction(&mut self, pin: u8, direction: Direction) -> Result<(), DriverError> {
        self.record_op(BackendCall::SetDirection(pin, direction), BackendOp::SetDirection)?;
        self.pins.entry(pin).or_default().direction = direction;
        Ok(())
    }

    fn set_level(&mut self, pin: u8, level: PinState) -> Result<(), DriverError> {
        self.record_op(BackendCall::SetLevel(pin, level), BackendOp::SetLevel)?;
        self.pins.entry(pin).or_default().latch = level;
        Ok(())
    }

    fn get_level(&mut self, pin: u8) -> PinState {
        // 读电平不会失败
        self.record(BackendCall::GetLevel(pin));
        let state = self.pin(pin);
        let input_enabled = state.direction.reads_input();
        if state.direction.drives_output() && (input_enabled || !self.strict_readback) {
            // 输出引脚回环读到锁存值
            state.latch
        } else if input_enabled {
            state.external
        } else {
            PinState::Low
        }
    }

    fn set_pull_mode(&mut self, pin: u8, mode: PullMode) -> Result<(), DriverError> {
        self.record_op(BackendCall::SetPullMode(pin, mode), BackendOp::SetPullMode)?;
        self.pins.entry(pin).or_default().pull = mode;
        Ok(())
    }

    fn install_isr_service(&mut self, flags: i32) -> Result<(), DriverError> {
        self.record_op(BackendCall::InstallIsrService(flags), BackendOp::InstallIsrService)?;
        if self.isr_installed {
            return Err(DriverError::new(
                BackendOp::InstallIsrService.name(),
                ESP_ERR_INVALID_STATE,
            ));
        }
        self.isr_installed = true;
        Ok(())
    }

    fn uninstall_isr_service(&mut self) {
        self.record(BackendCall::UninstallIsrService);
        self.isr_installed = false;
        for state in self.pins.values_mut() {
            state.handler = None;
        }
    }

    fn set_interrupt_type(&mut self, pin: u8, trigger: InterruptType) -> Result<(), DriverError> {
        self.record_op(BackendCall::SetInterruptType(pin, trigger), BackendOp::SetInterruptType)?;
        self.pins.entry(pin).or_default().trigger = trigger;
        Ok(())
    }

    unsafe fn add_isr_handler(
        &mut self,
        pin: u8,
        handler: IsrHandler,
        arg: *mut c_void,
    ) -> Result<(), DriverError> {
        self.record_op(BackendCall::AddIsrHandler(pin), BackendOp::AddIsrHandler)?;
        if !self.isr_installed {
            return Err(DriverError::new(BackendOp::AddIsrHandler.name(), ESP_ERR_INVALID_STATE));
        }
        self.pins.entry(pin).or_default().handler = Some((handler, arg));
        Ok(())
    }

    fn remove_isr_handler(&mut self, pin: u8) -> Result<(), DriverError> {
        self.record_op(BackendCall::RemoveIsrHandler(pin), BackendOp::RemoveIsrHandler)?;
        if !self.isr_installed {
            return Err(DriverError::new(
                BackendOp::RemoveIsrHandler.name(),
                ESP_ERR_INVALID_STATE,
            ));
        }
        self.pins.entry(pin).or_default().handler = None;
        Ok(())
    }

    fn enable_interrupt(&mut self, pin: u8) -> Result<(), DriverError> {
        self.record_op(BackendCall::EnableInterrupt(pin), BackendOp::EnableInterrupt)?;
        self.pins.entry(pin).or_default().intr_enabled = true;
        Ok(())
    }

    fn disable_interrupt(&mut self, pin: u8) -> Result<(), DriverError> {
        self.record_op(BackendCall::DisableInterrupt(pin), BackendOp::DisableInterrupt)?;
        self.pins.entry(pin).or_default().intr_enabled = false;
        Ok(())
    }
}
