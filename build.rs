fn main() {
    // 主机构建（cargo test）没有 ESP-IDF 环境
    if std::env::var("CARGO_CFG_TARGET_OS").as_deref() == Ok("espidf") {
        embuild::espidf::sysenv::output();
    }
}
