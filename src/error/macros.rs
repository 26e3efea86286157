//! # 错误处理宏

/// 快速创建配置错误的宏
#[macro_export]
macro_rules! config_error {
    ($msg:expr) => {
        $crate::error::ProxyError::config($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::ProxyError::config(format!($fmt, $($arg)*))
    };
}

/// 快速创建数据库错误的宏
#[macro_export]
macro_rules! database_error {
    ($msg:expr) => {
        $crate::error::ProxyError::database($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::ProxyError::database(format!($fmt, $($arg)*))
    };
}

/// 快速创建解密错误的宏
#[macro_export]
macro_rules! decryption_error {
    ($msg:expr) => {
        $crate::error::ProxyError::decryption($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::ProxyError::decryption(format!($fmt, $($arg)*))
    };
}
