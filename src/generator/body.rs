use super::{ExampleGenerator, FragmentGenerator, SchemaGenerator};
use crate::components::{ComponentKind, ComponentsContext};
use crate::document::{MediaType, RefOr, RequestBody};
use crate::dsl::{BodyDeclaration, TEXT_PLAIN};
use crate::error::ConfigurationError;
use indexmap::IndexMap;

/// Generator for request and response bodies.
///
/// The schema and examples are generated once and shared by every media
/// type entry. Without declared media types one is derived from the schema
/// shape (see [`TypeShape::default_media_type`](crate::dsl::TypeShape::default_media_type)).
#[derive(Debug, Clone, Copy, Default)]
pub struct BodyGenerator;

impl BodyGenerator {
    /// Media type map of a body, as embedded in a request body or response.
    pub fn content(
        &self,
        name: &str,
        body: &BodyDeclaration,
        ctx: &mut ComponentsContext,
    ) -> Result<IndexMap<String, MediaType>, ConfigurationError> {
        let schema = match &body.schema {
            Some(shape) => {
                let schema_name = shape.name().unwrap_or(name);
                Some(SchemaGenerator.generate(schema_name, shape, ctx)?)
            }
            None => None,
        };

        let mut examples = IndexMap::new();
        for (example_name, example) in &body.examples {
            let fragment = ExampleGenerator.generate(example_name, example, ctx)?;
            examples.insert(example_name.clone(), fragment);
        }

        let media_types: Vec<String> = if !body.media_types.is_empty() {
            for media_type in &body.media_types {
                validate_media_type(media_type)?;
            }
            body.media_types.clone()
        } else if let Some(shape) = &body.schema {
            vec![shape.default_media_type().to_string()]
        } else if !examples.is_empty() {
            vec![TEXT_PLAIN.to_string()]
        } else {
            Vec::new()
        };

        Ok(media_types
            .into_iter()
            .map(|media_type| {
                (
                    media_type,
                    MediaType {
                        schema: schema.clone(),
                        examples: examples.clone(),
                    },
                )
            })
            .collect())
    }
}

fn validate_media_type(media_type: &str) -> Result<(), ConfigurationError> {
    let valid = match media_type.split_once('/') {
        Some((kind, subtype)) => {
            !kind.is_empty()
                && !subtype.is_empty()
                && !subtype.contains('/')
                && !media_type.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(ConfigurationError::InvalidMediaType(media_type.to_string()))
    }
}

impl FragmentGenerator for BodyGenerator {
    type Declaration = BodyDeclaration;
    type Fragment = RequestBody;

    fn generate(
        &self,
        name: &str,
        declaration: &BodyDeclaration,
        ctx: &mut ComponentsContext,
    ) -> Result<RefOr<RequestBody>, ConfigurationError> {
        let body = RequestBody {
            description: declaration.description.clone(),
            content: self.content(name, declaration, ctx)?,
            required: declaration.required.unwrap_or(false),
        };
        if ctx.request_bodies_in_components() {
            let id = ctx.add_request_body(name, body);
            Ok(RefOr::reference(ComponentKind::RequestBodies.ref_path(&id)))
        } else {
            Ok(RefOr::Inline(body))
        }
    }
}
