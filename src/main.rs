use core::ffi::c_void;
use std::sync::atomic::{AtomicU32, Ordering};

use esp32_gpio::config::pins::{validate_config, PinConfig, PIN_CONFIG};
use esp32_gpio::{Direction, GpioFacade, InterruptType, PinBackend, PinState, Pull};

/// 按键中断计数
static PRESSES: AtomicU32 = AtomicU32::new(0);

extern "C" fn on_button(_arg: *mut c_void) {
    PRESSES.fetch_add(1, Ordering::Relaxed);
}

/// 配置 LED、按键和只能输入的传感器引脚
fn setup<B: PinBackend>(gpio: &mut GpioFacade<B>, pins: &PinConfig) -> anyhow::Result<()> {
    validate_config(pins, gpio.capabilities()).map_err(anyhow::Error::msg)?;

    // 翻转需要读回当前电平，ESP32 上必须打开输入通路
    gpio.set_direction(pins.led, Direction::InputOutput)?;
    gpio.set_value(pins.led, PinState::Low)?;

    gpio.set_direction(pins.button, Direction::Input)?;
    gpio.set_pull_up_down(pins.button, Pull::Up)?;

    gpio.set_direction(pins.sensor_input, Direction::Input)?;
    // GPIO 34 - 39 没有软件上拉，这里会被拒绝
    if let Err(e) = gpio.set_pull_up_down(pins.sensor_input, Pull::Up) {
        log::warn!("传感器引脚上拉被拒绝: {e}");
    }

    gpio.start_interrupt_service()?;
    gpio.set_interrupt(pins.button, InterruptType::FallingEdge, on_button)?;
    gpio.enable_interrupt(pins.button)?;
    Ok(())
}

#[cfg(target_os = "espidf")]
fn main() -> anyhow::Result<()> {
    use esp32_gpio::gpio::EspBackend;
    use esp32_gpio::GpioConfig;
    use std::thread::sleep;
    use std::time::Duration;

    // It is necessary to call this function once. Otherwise some patches to the runtime
    // implemented by esp-idf-sys might not link properly. See https://github.com/esp-rs/esp-idf-template/issues/71
    esp_idf_svc::sys::link_patches();

    // Bind the log crate to the ESP Logging facilities
    esp_idf_svc::log::EspLogger::initialize_default();

    let mut gpio = GpioFacade::new(EspBackend::new(), GpioConfig::new().debug(true));
    if let Err(e) = setup(&mut gpio, &PIN_CONFIG) {
        log::error!("GPIO 初始化失败: {e:?}");
        return Err(e);
    }
    // 之后的闪烁不需要逐条日志
    gpio.set_debug(false);

    let mut last_presses = 0;
    loop {
        gpio.toggle(PIN_CONFIG.led)?;

        let presses = PRESSES.load(Ordering::Relaxed);
        if presses != last_presses {
            log::info!("按键次数: {presses}");
            last_presses = presses;
        }
        sleep(Duration::from_millis(500));
    }
}

/// 主机上没有真实外设，用模拟后端走一遍同样的流程
#[cfg(not(target_os = "espidf"))]
fn main() -> anyhow::Result<()> {
    use esp32_gpio::gpio::SimBackend;
    use esp32_gpio::GpioConfig;

    let mut gpio = GpioFacade::new(SimBackend::with_strict_readback(), GpioConfig::new());
    setup(&mut gpio, &PIN_CONFIG)?;

    for _ in 0..4 {
        let led = gpio.toggle(PIN_CONFIG.led)?;
        println!("LED(GPIO{}) = {led:?}", PIN_CONFIG.led);
    }

    // 模拟按键按下再松开三次
    for _ in 0..3 {
        gpio.backend_mut().drive_input(PIN_CONFIG.button, PinState::High);
        gpio.backend_mut().drive_input(PIN_CONFIG.button, PinState::Low);
    }
    println!("按键次数: {}", PRESSES.load(Ordering::Relaxed));

    gpio.disable_interrupt(PIN_CONFIG.button)?;
    gpio.stop_interrupt_service();
    println!("驱动调用次数: {}", gpio.backend().calls().len());
    Ok(())
}
