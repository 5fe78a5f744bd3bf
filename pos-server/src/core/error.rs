use thiserror::Error;

/// 服务器启动/运行错误
///
/// 请求处理路径上的错误使用 [`AppError`](crate::utils::AppError)，这里只覆盖进程级别的失败。
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("监听地址绑定失败 {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP 服务错误: {0}")]
    Serve(#[from] std::io::Error),

    #[error("服务任务异常退出: {0}")]
    Task(String),
}

/// 服务器的 Result 类型别名
pub type Result<T> = std::result::Result<T, ServerError>;
