//! OpenAPI 3 document served at `/v3/api-docs`.

use serde_json::{json, Value};

/// Name of the bearer security scheme.
pub const BEARER_SCHEME: &str = "bearerAuth";

/// Build the document for this service.
pub fn document(service_name: &str, version: &str) -> Value {
    let secured = json!([{ BEARER_SCHEME: [] }]);
    let public = json!([]);

    json!({
        "openapi": "3.0.3",
        "info": {
            "title": "Server Status API",
            "description": format!(
                "API for monitoring {service_name} server status with Bearer token authentication"
            ),
            "version": version,
        },
        "security": secured,
        "components": {
            "securitySchemes": {
                BEARER_SCHEME: {
                    "type": "http",
                    "scheme": "bearer",
                    "description": "Bearer token matching the configured secret key or an allowed token",
                }
            },
            "schemas": schemas(),
        },
        "tags": [
            { "name": "Server Status", "description": "Endpoints for monitoring server health and status" },
            { "name": "Authentication", "description": "Endpoints for token validation" },
            { "name": "Info", "description": "Greeting and version" },
        ],
        "paths": {
            "/api/server-status": {
                "get": operation(
                    "Server Status",
                    "Get server status",
                    "Returns the current server status including uptime and memory information",
                    &secured,
                    "ServerStatusResponse",
                ),
            },
            "/api/server-status/uptime": {
                "get": operation(
                    "Server Status",
                    "Get server uptime",
                    "Returns the server uptime in milliseconds",
                    &secured,
                    "UptimeResponse",
                ),
            },
            "/api/hello": {
                "get": operation("Info", "Greeting", "Returns a greeting message", &secured, "MessageResponse"),
            },
            "/api/version": {
                "get": operation("Info", "Application version", "Returns the configured version", &secured, "VersionResponse"),
            },
            "/api/auth/check": {
                "get": operation(
                    "Authentication",
                    "Check authentication status",
                    "Reports whether the Authorization header carries a valid token. Callable without a token.",
                    &public,
                    "TokenValidationResponse",
                ),
            },
            "/api/auth/validate": {
                "post": operation(
                    "Authentication",
                    "Validate token",
                    "Validates the bearer token in the Authorization header. 400 for a missing or malformed header, 401 for an unknown token.",
                    &public,
                    "TokenValidationResponse",
                ),
            },
            "/actuator/health": {
                "get": operation("Server Status", "Health", "Lifecycle health of the server", &public, "HealthResponse"),
            },
        },
    })
}

fn operation(tag: &str, summary: &str, description: &str, security: &Value, schema: &str) -> Value {
    json!({
        "tags": [tag],
        "summary": summary,
        "description": description,
        "security": security,
        "responses": {
            "200": {
                "description": "OK",
                "content": {
                    "application/json": {
                        "schema": { "$ref": format!("#/components/schemas/{schema}") }
                    }
                }
            },
            "403": {
                "description": "Missing or invalid bearer token",
                "content": {
                    "application/json": { "schema": { "$ref": "#/components/schemas/ApiError" } }
                }
            }
        }
    })
}

fn schemas() -> Value {
    let int64 = json!({ "type": "integer", "format": "int64" });
    let string = json!({ "type": "string" });
    json!({
        "ServerStatusResponse": {
            "type": "object",
            "properties": {
                "status": string,
                "version": string,
                "timestamp": { "type": "string", "format": "date-time" },
                "uptime": int64,
                "availableProcessors": { "type": "integer", "format": "int32" },
                "totalMemory": int64,
                "freeMemory": int64,
                "usedMemory": int64,
            }
        },
        "UptimeResponse": {
            "type": "object",
            "properties": { "uptime": int64 }
        },
        "MessageResponse": {
            "type": "object",
            "properties": { "message": string }
        },
        "VersionResponse": {
            "type": "object",
            "properties": { "version": string }
        },
        "TokenValidationResponse": {
            "type": "object",
            "properties": { "valid": { "type": "boolean" }, "message": string }
        },
        "HealthResponse": {
            "type": "object",
            "properties": { "status": string, "detail": string }
        },
        "ApiError": {
            "type": "object",
            "properties": {
                "status": { "type": "integer", "format": "int32" },
                "message": string,
                "path": string,
                "timestamp": { "type": "string", "format": "date-time" },
                "errors": { "type": "object", "additionalProperties": string },
            }
        },
    })
}
