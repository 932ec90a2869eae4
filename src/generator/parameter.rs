use super::{FragmentGenerator, SchemaGenerator};
use crate::components::{ComponentKind, ComponentsContext};
use crate::document::{Parameter, ParameterLocation, RefOr};
use crate::dsl::{ParameterDeclaration, TypeShape};
use crate::error::ConfigurationError;

/// Generator for the OpenAPI Parameter Object
///
/// Path parameters are always required. Parameters without a declared
/// schema are documented as strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParameterGenerator;

impl FragmentGenerator for ParameterGenerator {
    type Declaration = ParameterDeclaration;
    type Fragment = Parameter;

    fn generate(
        &self,
        name: &str,
        declaration: &ParameterDeclaration,
        ctx: &mut ComponentsContext,
    ) -> Result<RefOr<Parameter>, ConfigurationError> {
        let shape = declaration.schema.clone().unwrap_or_else(TypeShape::string);
        let schema = SchemaGenerator.generate(&declaration.name, &shape, ctx)?;
        let parameter = Parameter {
            name: declaration.name.clone(),
            location: declaration.location,
            description: declaration.description.clone(),
            required: declaration.location == ParameterLocation::Path || declaration.required,
            deprecated: declaration.deprecated,
            schema: Some(schema),
            example: declaration.example.clone(),
        };
        if ctx.parameters_in_components() {
            let id = ctx.add_parameter(name, parameter);
            Ok(RefOr::reference(ComponentKind::Parameters.ref_path(&id)))
        } else {
            Ok(RefOr::Inline(parameter))
        }
    }
}
