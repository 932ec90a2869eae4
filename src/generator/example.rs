use super::FragmentGenerator;
use crate::components::{ComponentKind, ComponentsContext};
use crate::document::{Example, RefOr};
use crate::dsl::ExampleDeclaration;
use crate::error::ConfigurationError;

/// Generator for the OpenAPI Example Object
#[derive(Debug, Clone, Copy, Default)]
pub struct ExampleGenerator;

impl FragmentGenerator for ExampleGenerator {
    type Declaration = ExampleDeclaration;
    type Fragment = Example;

    fn generate(
        &self,
        name: &str,
        declaration: &ExampleDeclaration,
        ctx: &mut ComponentsContext,
    ) -> Result<RefOr<Example>, ConfigurationError> {
        let example = Example {
            summary: declaration.summary.clone(),
            description: declaration.description.clone(),
            value: Some(declaration.value.clone()),
        };
        if ctx.examples_in_components() {
            let id = ctx.add_example(name, example);
            Ok(RefOr::reference(ComponentKind::Examples.ref_path(&id)))
        } else {
            Ok(RefOr::Inline(example))
        }
    }
}
