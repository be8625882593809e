pub mod codec;

pub use codec::{decode, encode, encode_jpeg, encode_png, read_image, OutputFormat};
