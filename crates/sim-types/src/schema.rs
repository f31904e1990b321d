use serde_json::{json, Value};

use crate::document::SCHEMA_VERSION;

/// JSON Schema describing the full-document body format.
///
/// The `pair` definition doubles as the schema for single-pair bodies.
pub fn simulation_schema() -> Value {
    let field_matchers = json!({
        "type": "array",
        "items": { "$ref": "#/definitions/field-matcher" }
    });

    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "required": ["data", "meta"],
        "properties": {
            "data": {
                "type": "object",
                "properties": {
                    "pairs": {
                        "type": "array",
                        "items": { "$ref": "#/definitions/pair" }
                    },
                    "globalActions": {
                        "type": "object",
                        "properties": {
                            "delays": {
                                "type": "array",
                                "items": { "$ref": "#/definitions/delay" }
                            }
                        }
                    }
                }
            },
            "meta": {
                "type": "object",
                "required": ["schemaVersion"],
                "properties": {
                    "schemaVersion": { "type": "string", "enum": [SCHEMA_VERSION] },
                    "simulatorVersion": { "type": "string" }
                }
            }
        },
        "definitions": {
            "field-matcher": {
                "type": "object",
                "required": ["matcher", "value"],
                "properties": {
                    "matcher": { "type": "string", "minLength": 1 },
                    "value": {}
                }
            },
            "pair": {
                "type": "object",
                "required": ["request", "response"],
                "properties": {
                    "id": { "type": "string" },
                    "request": {
                        "type": "object",
                        "properties": {
                            "path": field_matchers,
                            "method": field_matchers,
                            "destination": field_matchers,
                            "scheme": field_matchers,
                            "body": field_matchers,
                            "query": field_matchers,
                            "headers": {
                                "type": "object",
                                "additionalProperties": field_matchers
                            },
                            "requiresState": {
                                "type": "object",
                                "additionalProperties": { "type": "string" }
                            }
                        }
                    },
                    "response": {
                        "type": "object",
                        "required": ["status"],
                        "properties": {
                            "status": { "type": "integer" },
                            "body": { "type": "string" },
                            "encodedBody": { "type": "boolean" },
                            "headers": {
                                "type": "object",
                                "additionalProperties": {
                                    "type": "array",
                                    "items": { "type": "string" }
                                }
                            },
                            "templated": { "type": "boolean" },
                            "fixedDelay": { "type": "integer", "minimum": 0 },
                            "transitionsState": {
                                "type": "object",
                                "additionalProperties": { "type": "string" }
                            },
                            "removesState": {
                                "type": "array",
                                "items": { "type": "string" }
                            }
                        }
                    }
                }
            },
            "delay": {
                "type": "object",
                "required": ["urlPattern", "delay"],
                "properties": {
                    "urlPattern": { "type": "string" },
                    "httpMethod": { "type": "string" },
                    "delay": { "type": "integer", "minimum": 0 }
                }
            }
        }
    })
}
