use async_graphql::SDLExportOptions;

use super::EngineSettings;

/// The introspection types from the GraphQL specification, appended when
/// `include_introspection_types` is set. The engine never prints them.
const INTROSPECTION_SDL: &str = r#"type __Schema {
	description: String
	types: [__Type!]!
	queryType: __Type!
	mutationType: __Type
	subscriptionType: __Type
	directives: [__Directive!]!
}

type __Type {
	kind: __TypeKind!
	name: String
	description: String
	specifiedByURL: String
	fields(includeDeprecated: Boolean = false): [__Field!]
	interfaces: [__Type!]
	possibleTypes: [__Type!]
	enumValues(includeDeprecated: Boolean = false): [__EnumValue!]
	inputFields(includeDeprecated: Boolean = false): [__InputValue!]
	ofType: __Type
	isOneOf: Boolean
}

enum __TypeKind {
	SCALAR
	OBJECT
	INTERFACE
	UNION
	ENUM
	INPUT_OBJECT
	LIST
	NON_NULL
}

type __Field {
	name: String!
	description: String
	args(includeDeprecated: Boolean = false): [__InputValue!]!
	type: __Type!
	isDeprecated: Boolean!
	deprecationReason: String
}

type __InputValue {
	name: String!
	description: String
	type: __Type!
	defaultValue: String
	isDeprecated: Boolean!
	deprecationReason: String
}

type __EnumValue {
	name: String!
	description: String
	isDeprecated: Boolean!
	deprecationReason: String
}

type __Directive {
	name: String!
	description: String
	locations: [__DirectiveLocation!]!
	args(includeDeprecated: Boolean = false): [__InputValue!]!
	isRepeatable: Boolean!
}

enum __DirectiveLocation {
	QUERY
	MUTATION
	SUBSCRIPTION
	FIELD
	FRAGMENT_DEFINITION
	FRAGMENT_SPREAD
	INLINE_FRAGMENT
	VARIABLE_DEFINITION
	SCHEMA
	SCALAR
	OBJECT
	FIELD_DEFINITION
	ARGUMENT_DEFINITION
	INTERFACE
	UNION
	ENUM
	ENUM_VALUE
	INPUT_OBJECT
	INPUT_FIELD_DEFINITION
}"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DefinitionKind {
    Scalar,
    Directive,
    Schema,
    Other,
}

impl DefinitionKind {
    fn of(line: &str) -> Self {
        let keyword = line
            .split(|c: char| c.is_whitespace() || c == '{' || c == '@')
            .next()
            .unwrap_or_default();
        match keyword {
            "scalar" => DefinitionKind::Scalar,
            "directive" => DefinitionKind::Directive,
            "schema" => DefinitionKind::Schema,
            _ => DefinitionKind::Other,
        }
    }
}

struct Definition<'a> {
    kind: DefinitionKind,
    lines: Vec<&'a str>,
}

/// Where the lines of an open block string go.
#[derive(Clone, Copy)]
enum Target {
    Pending,
    Current,
}

/// Splits SDL into top-level definitions. Descriptions directly above a
/// definition stay with it.
fn split_definitions(sdl: &str) -> Vec<Definition<'_>> {
    let mut definitions: Vec<Definition<'_>> = Vec::new();
    let mut pending: Vec<&str> = Vec::new();
    let mut open_string: Option<Target> = None;

    for line in sdl.lines() {
        let toggles = line.matches("\"\"\"").count() % 2 == 1;

        if let Some(target) = open_string {
            match target {
                Target::Pending => pending.push(line),
                Target::Current => match definitions.last_mut() {
                    Some(def) => def.lines.push(line),
                    None => pending.push(line),
                },
            }
            if toggles {
                open_string = None;
            }
            continue;
        }

        let top_level = !line.starts_with(char::is_whitespace);

        if line.trim().is_empty() {
            pending.push(line);
        } else if top_level && line.starts_with('"') {
            pending.push(line);
            if toggles {
                open_string = Some(Target::Pending);
            }
        } else if top_level && !line.starts_with('}') {
            let mut lines = std::mem::take(&mut pending);
            lines.push(line);
            definitions.push(Definition {
                kind: DefinitionKind::of(line),
                lines,
            });
        } else {
            match definitions.last_mut() {
                Some(def) => {
                    def.lines.append(&mut pending);
                    def.lines.push(line);
                }
                None => pending.push(line),
            }
            if toggles {
                open_string = Some(Target::Current);
            }
        }
    }

    definitions
}

/// Prints the engine's SDL filtered by the schema inclusion settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaPrinter {
    include_scalars: bool,
    include_schema_definition: bool,
    include_directives: bool,
    include_introspection_types: bool,
    federation: bool,
}

impl SchemaPrinter {
    pub fn from_settings(settings: &EngineSettings) -> Self {
        SchemaPrinter {
            include_scalars: settings.include_scalars,
            include_schema_definition: settings.include_schema_definition,
            include_directives: settings.include_directives,
            include_introspection_types: settings.include_introspection_types,
            federation: settings.federation_enabled,
        }
    }

    /// Export options to request the raw SDL from the engine with.
    pub fn export_options(&self) -> SDLExportOptions {
        let options = SDLExportOptions::new();
        if self.federation {
            options.federation()
        } else {
            options
        }
    }

    fn keeps(&self, kind: DefinitionKind) -> bool {
        match kind {
            DefinitionKind::Scalar => self.include_scalars,
            DefinitionKind::Directive => self.include_directives,
            DefinitionKind::Schema => self.include_schema_definition,
            DefinitionKind::Other => true,
        }
    }

    pub fn print(&self, sdl: &str) -> String {
        let mut blocks: Vec<String> = split_definitions(sdl)
            .into_iter()
            .filter(|def| self.keeps(def.kind))
            .map(|def| {
                def.lines
                    .iter()
                    .skip_while(|l| l.trim().is_empty())
                    .copied()
                    .collect::<Vec<_>>()
                    .join("\n")
                    .trim_end()
                    .to_string()
            })
            .collect();

        if self.include_introspection_types {
            blocks.push(INTROSPECTION_SDL.to_string());
        }

        let mut printed = blocks.join("\n\n");
        printed.push('\n');
        printed
    }
}
