//! Java syntax model for Jakarta EE analysis.
//!
//! [`lower_java`] parses a file with tree-sitter and lowers it into a
//! [`SourceUnit`]: declared types with their members, modifiers, annotations,
//! parameters and supertypes, plus every method invocation. Names are bound to
//! qualified names using only information from the file itself.

mod locate;
mod lower;
mod model;
mod parse;
mod resolve;
pub mod types;

pub use locate::DeclRef;
pub use lower::lower_java;
pub use model::{
    Annotation, AnnotationArg, CallArgument, Declarator, FieldDecl, Import, MethodCall,
    MethodDecl, ModifierToken, Modifiers, Parameter, SourceUnit, TypeDecl, TypeKind, TypeRef,
};
pub use parse::{parse_java, ParseError};
