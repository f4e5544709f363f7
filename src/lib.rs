pub mod errors;
pub mod execute;
pub mod http_file_parser;
pub mod http_request;
pub mod http_request_assembler;
pub mod http_request_executor;
pub mod http_response;
pub mod logger;
pub mod output_formatter;
