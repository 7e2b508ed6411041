//! XML utilities shared by the service response and registry file parsers.

mod utils;

pub use utils::{
    collect_text, elements_named, find_in_default_namespace, get_tag_name, required_int_attribute,
    strip_bom, text_attribute,
};
