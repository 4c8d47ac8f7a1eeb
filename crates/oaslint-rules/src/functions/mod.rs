//! # Built-in Rule Functions
//!
//! Each function is a thin layer over the schema analysis and walker
//! primitives. The ruleset decides which nodes a function sees and what
//! severity its diagnostics carry.
//!
//! | Function | Built on |
//! |----------|----------|
//! | `ref-siblings` | document walker |
//! | `ref-pattern` | document walker |
//! | `min-max-consistency` | document walker |
//! | `property-description` | nested traversal |
//! | `superfluous-allof` | composed traversal |
//! | `required-property-defined` | nested + composed traversal, `schema_has_property` |
//! | `property-consistent-type` | nested traversal, `allOf` branches |
//! | `string-boundary` | subschema traversal, `get_schema_type` |
//! | `array-of-arrays` | nested traversal, `is_array_schema` |
//! | `disallowed-header` | parameter targets, `functionOptions.headerName` |

mod array_of_arrays;
mod disallowed_header;
mod min_max;
mod property_description;
mod property_type;
mod ref_pattern;
mod ref_siblings;
mod required_property;
mod string_boundary;
mod superfluous_allof;

pub use array_of_arrays::ArrayOfArrays;
pub use disallowed_header::DisallowedHeader;
pub use min_max::MinMaxConsistency;
pub use property_description::PropertyDescription;
pub use property_type::PropertyConsistentType;
pub use ref_pattern::RefPattern;
pub use ref_siblings::RefSiblings;
pub use required_property::RequiredPropertyDefined;
pub use string_boundary::StringBoundary;
pub use superfluous_allof::SuperfluousAllOf;

use crate::function::RuleFunction;

/// One instance of every built-in function.
pub fn builtin() -> Vec<Box<dyn RuleFunction>> {
    vec![
        Box::new(ArrayOfArrays),
        Box::new(DisallowedHeader),
        Box::new(MinMaxConsistency),
        Box::new(PropertyDescription),
        Box::new(PropertyConsistentType),
        Box::new(RefPattern),
        Box::new(RefSiblings),
        Box::new(RequiredPropertyDefined),
        Box::new(StringBoundary),
        Box::new(SuperfluousAllOf),
    ]
}
