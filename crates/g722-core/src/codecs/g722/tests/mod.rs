//! G.722 Test Modules
//!
//! Signal-level tests of the complete codec. Bit-exact unit tests live next
//! to the code they cover.

mod utils;
