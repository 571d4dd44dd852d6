//! OpenAPI description of the airport routes, plus a Swagger UI page to browse it.

use actix_web::{get, http::header::ContentType, HttpResponse, Responder};
use serde_json::json;
use utoipa::openapi::path::{
    Operation, OperationBuilder, Parameter, ParameterBuilder, ParameterIn, PathItemBuilder,
};
use utoipa::openapi::request_body::{RequestBody, RequestBodyBuilder};
use utoipa::openapi::schema::AdditionalProperties;
use utoipa::openapi::{
    ArrayBuilder, ComponentsBuilder, ContentBuilder, InfoBuilder, ObjectBuilder, OpenApi,
    OpenApiBuilder, PathItemType, PathsBuilder, Ref, RefOr, Required, ResponseBuilder,
    ResponsesBuilder, Schema, SchemaType,
};

const AIRPORT_SCHEMA: &str = "Airport";
const TAG: &str = "airports";

const SWAGGER_PAGE: &str = r##"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8" />
    <title>Airport API</title>
    <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
  </head>
  <body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script>
      window.ui = SwaggerUIBundle({
        url: "/api-docs/openapi.json",
        dom_id: "#swagger-ui",
        deepLinking: true,
      });
    </script>
  </body>
</html>
"##;

#[get("/api-docs/openapi.json")]
pub async fn openapi_json() -> impl Responder {
    HttpResponse::Ok().json(openapi())
}

#[get("/api-docs")]
pub async fn swagger_page() -> impl Responder {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(SWAGGER_PAGE)
}

pub fn openapi() -> OpenApi {
    let paths = PathsBuilder::new()
        .path(
            "/airports",
            PathItemBuilder::new()
                .operation(PathItemType::Get, list_operation())
                .operation(PathItemType::Post, create_operation())
                .build(),
        )
        .path(
            "/airports/{icao}",
            PathItemBuilder::new()
                .operation(PathItemType::Get, get_operation())
                .operation(PathItemType::Put, update_operation())
                .build(),
        )
        .path(
            "/airports/{icao}/delete",
            PathItemBuilder::new()
                .operation(PathItemType::Delete, delete_operation())
                .build(),
        )
        .build();

    OpenApiBuilder::new()
        .info(
            InfoBuilder::new()
                .title("Airport API")
                .version(env!("CARGO_PKG_VERSION"))
                .description(Some(
                    "Create, read, update, delete and page through an in-memory airport directory.",
                ))
                .build(),
        )
        .paths(paths)
        .components(Some(
            ComponentsBuilder::new()
                .schema(AIRPORT_SCHEMA, airport_schema())
                .build(),
        ))
        .build()
}

fn string_schema(description: &str) -> RefOr<Schema> {
    RefOr::T(Schema::Object(
        ObjectBuilder::new()
            .schema_type(SchemaType::String)
            .description(Some(description))
            .build(),
    ))
}

fn airport_schema() -> RefOr<Schema> {
    RefOr::T(Schema::Object(
        ObjectBuilder::new()
            .schema_type(SchemaType::Object)
            .property("icao", string_schema("ICAO code, the lookup key"))
            .property("iata", string_schema("IATA code"))
            .property("name", string_schema("Airport name"))
            .property("city", string_schema("City served"))
            .additional_properties(Some(AdditionalProperties::FreeForm(true)))
            .example(Some(json!({
                "icao": "00PS",
                "iata": "",
                "name": "Thomas Field",
                "city": "Loganville",
                "state": "Pennsylvania",
                "country": "US",
            })))
            .build(),
    ))
}

fn airport_ref() -> RefOr<Schema> {
    RefOr::Ref(Ref::from_schema_name(AIRPORT_SCHEMA))
}

fn json_response(description: &str, schema: RefOr<Schema>) -> ResponseBuilder {
    ResponseBuilder::new().description(description).content(
        "application/json",
        ContentBuilder::new().schema(schema).build(),
    )
}

fn error_response(description: &str) -> ResponseBuilder {
    let error = ObjectBuilder::new()
        .schema_type(SchemaType::Object)
        .property("error", string_schema("What went wrong"))
        .build();

    json_response(description, RefOr::T(Schema::Object(error)))
}

fn airport_body(description: &str) -> Option<RequestBody> {
    Some(
        RequestBodyBuilder::new()
            .description(Some(description))
            .content(
                "application/json",
                ContentBuilder::new().schema(airport_ref()).build(),
            )
            .required(Some(Required::True))
            .build(),
    )
}

fn icao_parameter(description: &str) -> Parameter {
    ParameterBuilder::new()
        .name("icao")
        .parameter_in(ParameterIn::Path)
        .required(Required::True)
        .description(Some(description))
        .schema(Some(string_schema("ICAO code")))
        .build()
}

fn integer_query(name: &str, description: &str, schema: ObjectBuilder) -> Parameter {
    ParameterBuilder::new()
        .name(name)
        .parameter_in(ParameterIn::Query)
        .required(Required::False)
        .description(Some(description))
        .schema(Some(RefOr::T(Schema::Object(
            schema.schema_type(SchemaType::Integer).build(),
        ))))
        .build()
}

fn list_operation() -> Operation {
    let page_of_airports = ArrayBuilder::new().items(airport_ref()).build();

    OperationBuilder::new()
        .tag(TAG)
        .operation_id(Some("list_airports"))
        .summary(Some("Returns a page of airports"))
        .parameter(integer_query(
            "page",
            "Page number, starting at 1",
            ObjectBuilder::new().minimum(Some(1.0)).default(Some(json!(1))),
        ))
        .parameter(integer_query(
            "pageSize",
            "The number of items to return",
            ObjectBuilder::new()
                .minimum(Some(1.0))
                .maximum(Some(100.0))
                .default(Some(json!(25))),
        ))
        .responses(
            ResponsesBuilder::new()
                .response(
                    "200",
                    RefOr::T(
                        json_response(
                            "The requested page, empty when the parameters are unusable",
                            RefOr::T(Schema::Array(page_of_airports)),
                        )
                        .build(),
                    ),
                )
                .build(),
        )
        .build()
}

fn create_operation() -> Operation {
    OperationBuilder::new()
        .tag(TAG)
        .operation_id(Some("create_airport"))
        .summary(Some("Create a new airport"))
        .description(Some("Appends the airport to the directory"))
        .request_body(airport_body("Airport to add"))
        .responses(
            ResponsesBuilder::new()
                .response(
                    "201",
                    RefOr::T(json_response("Resource created successfully", airport_ref()).build()),
                )
                .response("400", RefOr::T(error_response("Bad request").build()))
                .build(),
        )
        .build()
}

fn update_operation() -> Operation {
    OperationBuilder::new()
        .tag(TAG)
        .operation_id(Some("update_airport"))
        .summary(Some("Updates existing airport"))
        .description(Some(
            "Overwrites the fields present in the body, other fields are kept",
        ))
        .parameter(icao_parameter("ICAO of airport to update"))
        .request_body(airport_body("Fields to overwrite"))
        .responses(
            ResponsesBuilder::new()
                .response(
                    "202",
                    RefOr::T(json_response("Accepted", airport_ref()).build()),
                )
                .response("400", RefOr::T(error_response("Bad request").build()))
                .response("404", RefOr::T(error_response("Airport not found").build()))
                .build(),
        )
        .build()
}

fn get_operation() -> Operation {
    OperationBuilder::new()
        .tag(TAG)
        .operation_id(Some("get_airport"))
        .summary(Some("Find airport by ICAO"))
        .parameter(icao_parameter("ICAO of airport to return"))
        .responses(
            ResponsesBuilder::new()
                .response(
                    "200",
                    RefOr::T(
                        json_response(
                            "Success, the body is empty when no airport has this code",
                            airport_ref(),
                        )
                        .build(),
                    ),
                )
                .build(),
        )
        .build()
}

fn delete_operation() -> Operation {
    OperationBuilder::new()
        .tag(TAG)
        .operation_id(Some("delete_airport"))
        .summary(Some("Deletes an airport"))
        .parameter(icao_parameter("ICAO to delete"))
        .responses(
            ResponsesBuilder::new()
                .response(
                    "202",
                    RefOr::T(ResponseBuilder::new().description("Deleted").build()),
                )
                .build(),
        )
        .build()
}
