pub mod codec;
pub mod data_encoder_decoder;
pub mod lsb;
pub mod traversal;
