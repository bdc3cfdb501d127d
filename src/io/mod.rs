pub mod reader;
pub mod storage;
pub mod writer;
