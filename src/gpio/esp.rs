//! ESP-IDF GPIO 驱动后端
//!
//! 直接调用 `driver/gpio.h` 中的函数，把枚举映射为 ESP-IDF 常量

use core::ffi::c_void;

use esp_idf_sys::{self as sys, esp};

use super::backend::PinBackend;
use super::error::DriverError;
use super::types::{level_bit, Direction, InterruptType, IsrHandler, PinState, PullMode};

fn check(op: &'static str, ret: sys::esp_err_t) -> Result<(), DriverError> {
    esp!(ret).map_err(|e| DriverError::new(op, e.code()))
}

fn gpio_mode(direction: Direction) -> sys::gpio_mode_t {
    match direction {
        Direction::Disabled => sys::gpio_mode_t_GPIO_MODE_DISABLE,
        Direction::Input => sys::gpio_mode_t_GPIO_MODE_INPUT,
        Direction::Output => sys::gpio_mode_t_GPIO_MODE_OUTPUT,
        Direction::OutputOpenDrain => sys::gpio_mode_t_GPIO_MODE_OUTPUT_OD,
        Direction::InputOutputOpenDrain => sys::gpio_mode_t_GPIO_MODE_INPUT_OUTPUT_OD,
        Direction::InputOutput => sys::gpio_mode_t_GPIO_MODE_INPUT_OUTPUT,
    }
}

fn pull_mode(mode: PullMode) -> sys::gpio_pull_mode_t {
    match mode {
        PullMode::Up => sys::gpio_pull_mode_t_GPIO_PULLUP_ONLY,
        PullMode::Down => sys::gpio_pull_mode_t_GPIO_PULLDOWN_ONLY,
        PullMode::Floating => sys::gpio_pull_mode_t_GPIO_FLOATING,
    }
}

fn intr_type(trigger: InterruptType) -> sys::gpio_int_type_t {
    match trigger {
        InterruptType::Disabled => sys::gpio_int_type_t_GPIO_INTR_DISABLE,
        InterruptType::RisingEdge => sys::gpio_int_type_t_GPIO_INTR_POSEDGE,
        InterruptType::FallingEdge => sys::gpio_int_type_t_GPIO_INTR_NEGEDGE,
        InterruptType::AnyEdge => sys::gpio_int_type_t_GPIO_INTR_ANYEDGE,
        InterruptType::LowLevel => sys::gpio_int_type_t_GPIO_INTR_LOW_LEVEL,
        InterruptType::HighLevel => sys::gpio_int_type_t_GPIO_INTR_HIGH_LEVEL,
    }
}

#[inline]
fn gpio_num(pin: u8) -> sys::gpio_num_t {
    pin as sys::gpio_num_t
}

/// 基于 ESP-IDF GPIO 驱动的后端
///
/// 驱动本身是全局的，这个类型不持有任何状态
#[derive(Debug, Default)]
pub struct EspBackend {
    _private: (),
}

impl EspBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PinBackend for EspBackend {
    fn set_direction(&mut self, pin: u8, direction: Direction) -> Result<(), DriverError> {
        let ret = unsafe { sys::gpio_set_direction(gpio_num(pin), gpio_mode(direction)) };
        check("gpio_set_direction", ret)
    }

    fn set_level(&mut self, pin: u8, level: PinState) -> Result<(), DriverError> {
        let ret = unsafe { sys::gpio_set_level(gpio_num(pin), level_bit(level) as u32) };
        check("gpio_set_level", ret)
    }

    fn get_level(&mut self, pin: u8) -> PinState {
        let level = unsafe { sys::gpio_get_level(gpio_num(pin)) };
        PinState::from(level != 0)
    }

    fn set_pull_mode(&mut self, pin: u8, mode: PullMode) -> Result<(), DriverError> {
        let ret = unsafe { sys::gpio_set_pull_mode(gpio_num(pin), pull_mode(mode)) };
        check("gpio_set_pull_mode", ret)
    }

    fn install_isr_service(&mut self, flags: i32) -> Result<(), DriverError> {
        let ret = unsafe { sys::gpio_install_isr_service(flags) };
        check("gpio_install_isr_service", ret)
    }

    fn uninstall_isr_service(&mut self) {
        unsafe { sys::gpio_uninstall_isr_service() };
    }

    fn set_interrupt_type(&mut self, pin: u8, trigger: InterruptType) -> Result<(), DriverError> {
        let ret = unsafe { sys::gpio_set_intr_type(gpio_num(pin), intr_type(trigger)) };
        check("gpio_set_intr_type", ret)
    }

    unsafe fn add_isr_handler(
        &mut self,
        pin: u8,
        handler: IsrHandler,
        arg: *mut c_void,
    ) -> Result<(), DriverError> {
        // SAFETY: 回调和参数的有效性由调用者保证
        let ret = unsafe { sys::gpio_isr_handler_add(gpio_num(pin), Some(handler), arg) };
        check("gpio_isr_handler_add", ret)
    }

    fn remove_isr_handler(&mut self, pin: u8) -> Result<(), DriverError> {
        let ret = unsafe { sys::gpio_isr_handler_remove(gpio_num(pin)) };
        check("gpio_isr_handler_remove", ret)
    }

    fn enable_interrupt(&mut self, pin: u8) -> Result<(), DriverError> {
        let ret = unsafe { sys::gpio_intr_enable(gpio_num(pin)) };
        check("gpio_intr_enable", ret)
    }

    fn disable_interrupt(&mut self, pin: u8) -> Result<(), DriverError> {
        let ret = unsafe { sys::gpio_intr_disable(gpio_num(pin)) };
        check("gpio_intr_disable", ret)
    }
}
