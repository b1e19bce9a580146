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

/// 快速创建认证错误的宏
#[macro_export]
macro_rules! auth_error {
    ($msg:expr) => {
        $crate::error::ProxyError::authentication($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::ProxyError::authentication(format!($fmt, $($arg)*))
    };
}

/// 快速创建网络错误的宏
#[macro_export]
macro_rules! network_error {
    ($msg:expr) => {
        $crate::error::ProxyError::network($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::ProxyError::network(format!($fmt, $($arg)*))
    };
}

/// 快速创建内部错误的宏
#[macro_export]
macro_rules! internal_error {
    ($msg:expr) => {
        $crate::error::ProxyError::internal($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::ProxyError::internal(format!($fmt, $($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use crate::error::ProxyError;

    #[test]
    fn macros_support_format_arguments() {
        let err = config_error!("无效端口: {}", 0);
        assert_eq!(err.to_string(), "配置错误: 无效端口: 0");

        let err = auth_error!("missing token");
        assert!(matches!(err, ProxyError::Authentication { .. }));
    }
}
