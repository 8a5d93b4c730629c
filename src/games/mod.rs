pub mod puyo;
