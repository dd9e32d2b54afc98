#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use bp_editor as editor;
pub use bp_index as index;
pub use bp_reflect as reflect;
pub use bp_utils as utils;
