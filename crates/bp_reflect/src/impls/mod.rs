//! `Reflect` implementations for standard types.
//!
//! - scalars: `bool`, `char`, integers up to 64 bits, `isize`, `usize`,
//!   `f32`, `f64`, `String`;
//! - `Option<T>`, the nullable slot;
//! - lists: `Vec<T>`, `VecDeque<T>`, `[T; N]`;
//! - maps: `HashMap<String, V, S>`, `BTreeMap<String, V>`.

mod list;
mod map;
mod option;
mod scalar;
