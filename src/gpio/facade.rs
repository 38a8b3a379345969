//! GPIO 门面
//!
//! 每个操作先按芯片能力表检查引脚编号、方向和上下拉是否合法，
//! 然后交给驱动后端执行。检查失败时不会发出任何驱动调用。

use core::ffi::c_void;
use core::ptr;

use super::backend::PinBackend;
use super::error::{DriverError, GpioError};
use super::types::{
    level_bit, Direction, InterruptType, IsrCallback, IsrHandler, PinState, Pull, PullMode,
};
use crate::config::{DelegatePolicy, GpioConfig, PinCapabilities};

pub type Result<T> = core::result::Result<T, GpioError>;

/// GPIO 门面
///
/// 调试开关属于实例本身，不同实例互不影响。
/// 同一个引脚的并发访问由调用者负责互斥。
pub struct GpioFacade<B: PinBackend> {
    backend: B,
    caps: PinCapabilities,
    config: GpioConfig,
}

impl<B: PinBackend> GpioFacade<B> {
    /// 使用 ESP32 能力表创建门面
    pub fn new(backend: B, config: GpioConfig) -> Self {
        Self::with_capabilities(backend, PinCapabilities::ESP32, config)
    }

    /// 使用指定芯片能力表创建门面
    pub fn with_capabilities(backend: B, caps: PinCapabilities, config: GpioConfig) -> Self {
        Self {
            backend,
            caps,
            config,
        }
    }

    pub fn set_debug(&mut self, enable: bool) {
        self.config.debug = enable;
    }

    pub fn is_debug(&self) -> bool {
        self.config.debug
    }

    pub fn config(&self) -> &GpioConfig {
        &self.config
    }

    pub fn capabilities(&self) -> &PinCapabilities {
        &self.caps
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    fn check_pin(&self, pin: u8) -> Result<()> {
        if self.caps.is_valid(pin) {
            Ok(())
        } else {
            Err(GpioError::InvalidPin(pin))
        }
    }

    fn check_output(&self, pin: u8) -> Result<()> {
        self.check_pin(pin)?;
        if self.caps.is_output_capable(pin) {
            Ok(())
        } else {
            Err(GpioError::NotOutputCapable(pin))
        }
    }

    fn check_pull(&self, pin: u8) -> Result<()> {
        self.check_pin(pin)?;
        if self.caps.is_pull_capable(pin) {
            Ok(())
        } else {
            Err(GpioError::UnsupportedPull(pin))
        }
    }

    /// 按配置的策略执行两步驱动调用
    fn run_pair<F, G>(&mut self, first: F, second: G) -> core::result::Result<(), DriverError>
    where
        F: FnOnce(&mut B) -> core::result::Result<(), DriverError>,
        G: FnOnce(&mut B) -> core::result::Result<(), DriverError>,
    {
        match self.config.policy {
            DelegatePolicy::ShortCircuit => {
                first(&mut self.backend)?;
                second(&mut self.backend)
            }
            DelegatePolicy::BestEffort => {
                let first = first(&mut self.backend);
                let second = second(&mut self.backend);
                first.and(second)
            }
        }
    }

    /// 设置引脚方向
    ///
    /// 只能输入的引脚不接受任何需要驱动输出的方向
    pub fn set_direction(&mut self, pin: u8, direction: Direction) -> Result<()> {
        self.check_pin(pin)?;
        if direction.drives_output() && !self.caps.is_output_capable(pin) {
            return Err(GpioError::UnsupportedDirection { pin, direction });
        }

        self.backend.set_direction(pin, direction)?;

        gpio_debug!(self.is_debug(), "GPIO = {pin} Direction = {direction}");
        Ok(())
    }

    /// 设置输出电平
    ///
    /// 只检查引脚是否具备输出能力，不检查当前配置的方向
    pub fn set_value(&mut self, pin: u8, value: PinState) -> Result<()> {
        self.check_output(pin)?;

        self.backend.set_level(pin, value)?;

        gpio_debug!(self.is_debug(), "GPIO = {pin} Value Set = {}", level_bit(value));
        Ok(())
    }

    /// 读取引脚瞬时电平，输入输出引脚都可以读
    pub fn get_value(&mut self, pin: u8) -> Result<PinState> {
        self.check_pin(pin)?;

        let value = self.backend.get_level(pin);

        gpio_debug!(self.is_debug(), "GPIO = {pin} Value Get = {}", level_bit(value));
        Ok(value)
    }

    /// 翻转输出电平
    ///
    /// 先读回当前电平再写入相反值。ESP32 读的是输入寄存器，
    /// 引脚需要配置为 `InputOutput`（或 `InputOutputOpenDrain`）才能读回输出，
    /// 纯 `Output` 方向下每次都会读到低电平。
    ///
    /// # 返回
    /// * `Ok(PinState)` - 写入后的新电平
    pub fn toggle(&mut self, pin: u8) -> Result<PinState> {
        self.check_output(pin)?;

        let value = !self.backend.get_level(pin);
        self.backend.set_level(pin, value)?;

        gpio_debug!(self.is_debug(), "GPIO = {pin} Toggle. New val = {}", level_bit(value));
        Ok(value)
    }

    pub fn set_pull_up_down(&mut self, pin: u8, pull: Pull) -> Result<()> {
        self.check_pull(pin)?;

        let mode = PullMode::from(pull);
        self.backend.set_pull_mode(pin, mode)?;

        gpio_debug!(self.is_debug(), "GPIO = {pin} Pullup / pulldown set ({mode})");
        Ok(())
    }

    /// 移除上拉/下拉，引脚变为浮空
    pub fn remove_pull_up_down(&mut self, pin: u8) -> Result<()> {
        self.check_pull(pin)?;

        self.backend.set_pull_mode(pin, PullMode::Floating)?;

        gpio_debug!(self.is_debug(), "GPIO = {pin} Removed pullup / pulldown");
        Ok(())
    }

    /// 安装按引脚分发的 ISR 服务，重复安装由驱动报错
    pub fn start_interrupt_service(&mut self) -> Result<()> {
        let flags = self.config.isr_flags;
        self.backend.install_isr_service(flags)?;

        gpio_debug!(self.is_debug(), "ISR service started (flags = {flags:#x})");
        Ok(())
    }

    pub fn stop_interrupt_service(&mut self) {
        self.backend.uninstall_isr_service();

        gpio_debug!(self.is_debug(), "ISR service stopped");
    }

    /// 设置引脚中断触发方式并注册回调，回调参数为空指针
    ///
    /// 只接受安全的 `extern "C" fn`，需要解引用参数的回调走
    /// [`GpioFacade::set_interrupt_with_arg`]
    pub fn set_interrupt(
        &mut self,
        pin: u8,
        trigger: InterruptType,
        handler: IsrCallback,
    ) -> Result<()> {
        // SAFETY: 安全回调可以用任意参数调用，空指针不需要保证生命周期
        unsafe { self.set_interrupt_with_arg(pin, trigger, handler, ptr::null_mut()) }
    }

    /// 设置引脚中断触发方式并注册带参数的回调
    ///
    /// # Safety
    /// `arg` 会原样传给中断上下文里的 `handler`，调用者必须保证以 `arg`
    /// 调用 `handler` 是合法的，并且 `arg` 在
    /// 回调被 [`GpioFacade::disable_interrupt`] 或停止 ISR 服务移除之前一直有效，
    /// 并且可以在中断上下文中安全访问。
    pub unsafe fn set_interrupt_with_arg(
        &mut self,
        pin: u8,
        trigger: InterruptType,
        handler: IsrHandler,
        arg: *mut c_void,
    ) -> Result<()> {
        self.check_pin(pin)?;

        self.run_pair(
            |backend| backend.set_interrupt_type(pin, trigger),
            // SAFETY: 由本函数的调用者保证
            |backend| unsafe { backend.add_isr_handler(pin, handler, arg) },
        )?;

        gpio_debug!(self.is_debug(), "GPIO = {pin} Interrupt type = {trigger} Set");
        Ok(())
    }

    pub fn enable_interrupt(&mut self, pin: u8) -> Result<()> {
        self.check_pin(pin)?;

        self.backend.enable_interrupt(pin)?;

        gpio_debug!(self.is_debug(), "GPIO = {pin} Interrupt Enabled");
        Ok(())
    }

    /// 关闭引脚中断并从 ISR 服务移除回调
    ///
    /// 第二步失败时第一步不会回滚
    pub fn disable_interrupt(&mut self, pin: u8) -> Result<()> {
        self.check_pin(pin)?;

        self.run_pair(
            |backend| backend.disable_interrupt(pin),
            |backend| backend.remove_isr_handler(pin),
        )?;

        gpio_debug!(self.is_debug(), "GPIO = {pin} Interrupt Disabled + handler Removed");
        Ok(())
    }
}
