pub mod recipes;

use utoipa::OpenApi;

/// Generate the complete OpenAPI spec by merging all module specs
pub fn openapi() -> utoipa::openapi::OpenApi {
    #[derive(OpenApi)]
    #[openapi(info(
        title = "stovetop",
        description = "Generate one-pan camping stove recipes from a few ingredients"
    ))]
    struct BaseApi;

    let mut spec = BaseApi::openapi();

    let modules: Vec<utoipa::openapi::OpenApi> = vec![recipes::ApiDoc::openapi()];

    for module_spec in modules {
        // Merge paths
        spec.paths.paths.extend(module_spec.paths.paths);

        // Merge components (schemas)
        if let Some(module_components) = module_spec.components {
            match spec.components.as_mut() {
                Some(spec_components) => spec_components.schemas.extend(module_components.schemas),
                None => spec.components = Some(module_components),
            }
        }
    }

    spec
}
