use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct CommunityDoc {
    pub id: i32,
    pub name: String,
    pub description: String,
    /// RFC 3339 timestamp
    #[schema(rename = "createdAt")]
    pub created_at: String,
}

#[derive(ToSchema)]
pub struct CreateCommunityDoc {
    pub name: String,
    pub description: Option<String>,
}

/// Full representation; omitted name/description are stored as empty strings.
#[derive(ToSchema)]
pub struct ReplaceCommunityDoc {
    /// Must equal the path id when present
    pub id: Option<i32>,
    pub name: Option<String>,
    pub description: Option<String>,
    #[schema(rename = "createdAt")]
    pub created_at: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::communities::list,
        crate::communities::get,
        crate::communities::create,
        crate::communities::update,
        crate::communities::delete,
    ),
    components(
        schemas(
            HealthResponse,
            CommunityDoc,
            CreateCommunityDoc,
            ReplaceCommunityDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "community")
    )
)]
pub struct ApiDoc;
