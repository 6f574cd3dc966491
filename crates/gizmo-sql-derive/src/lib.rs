//! Derive macro for persistable record types.
//!
//! This crate provides `#[derive(Record)]`, which emits the static field
//! declaration table `gizmo-sql-core` generates statements from.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    Attribute, Data, DeriveInput, Fields, GenericArgument, LitBool, LitStr, Path, PathArguments,
    Type, parse_macro_input,
};

/// Derives the `Record` trait for a struct with named fields.
///
/// # Attributes
///
/// - `#[record(table = "name")]` - Explicit table name (defaults to the
///   snake_case of the struct name)
/// - `#[record(catalog = "name")]` / `#[record(schema = "name")]` - Table
///   qualifier; the catalog wins when both are given
/// - `#[record(extends = Parent)]` - Appends the fields of another `Record`
///   after this struct's own fields
///
/// # Field Attributes
///
/// - `#[column(name = "column_name")]` - Explicit column name (defaults to the
///   snake_case of the field name)
/// - `#[column(rename = "fieldName")]` - Placeholder name (defaults to the
///   camelCase of the field name)
/// - `#[column(insertable = false)]` / `#[column(updatable = false)]` - Leaves
///   the column out of INSERT / UPDATE statements
/// - `#[column(skip)]` - The field is not persisted
/// - `#[column(sequence)]`, `#[column(mapping)]`, `#[column(scalar)]` -
///   Overrides the value shape inferred from the field type
///
/// List, set and map types (`Vec`, `HashSet`, `BTreeMap`, ...) are inferred
/// as collections and never take part in statements; `Vec<u8>` is treated as
/// a single binary value.
#[proc_macro_derive(Record, attributes(record, column))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive_record_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

fn derive_record_impl(input: DeriveInput) -> syn::Result<TokenStream2> {
    let record_attrs = parse_record_attrs(&input.attrs)?;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            Fields::Unit => {
                return Ok(derive_output(&input, &record_attrs, &[]));
            }
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    &input,
                    "Record derive only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input,
                "Record derive only supports structs",
            ));
        }
    };

    let mut field_infos: Vec<FieldInfo> = Vec::new();
    for field in fields {
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let column_attrs = parse_column_attrs(&field.attrs)?;
        let rust_name = ident.to_string();
        let rust_name = rust_name.trim_start_matches("r#");
        field_infos.push(FieldInfo {
            name: column_attrs
                .rename
                .unwrap_or_else(|| to_camel_case(rust_name)),
            shape: column_attrs.shape.unwrap_or_else(|| infer_shape(&field.ty)),
            column_name: column_attrs.name,
            insertable: column_attrs.insertable,
            updatable: column_attrs.updatable,
            skip: column_attrs.skip,
        });
    }

    Ok(derive_output(&input, &record_attrs, &field_infos))
}

fn derive_output(
    input: &DeriveInput,
    record_attrs: &RecordAttrs,
    field_infos: &[FieldInfo],
) -> TokenStream2 {
    let struct_name = &input.ident;
    let simple_name = struct_name.to_string();
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let field_defs: Vec<TokenStream2> = field_infos
        .iter()
        .map(|info| {
            let name = &info.name;
            let shape = match info.shape {
                Shape::Scalar => quote! { ::gizmo_sql_core::schema::ValueShape::Scalar },
                Shape::Sequence => quote! { ::gizmo_sql_core::schema::ValueShape::Sequence },
                Shape::Mapping => quote! { ::gizmo_sql_core::schema::ValueShape::Mapping },
            };
            let column = info
                .column_name
                .as_ref()
                .map(|column| quote! { .column(#column) });
            let insertable = info.insertable;
            let updatable = info.updatable;
            let skip = info.skip.then(|| quote! { .skip() });

            quote! {
                ::gizmo_sql_core::schema::FieldDef::new(#name)
                    .shape(#shape)
                    #column
                    .insertable(#insertable)
                    .updatable(#updatable)
                    #skip
            }
        })
        .collect();

    let table_name = record_attrs.table.as_ref().map(|v| quote! { .name(#v) });
    let catalog = record_attrs.catalog.as_ref().map(|v| quote! { .catalog(#v) });
    let schema = record_attrs.schema.as_ref().map(|v| quote! { .schema(#v) });
    let extends = record_attrs.extends.as_ref().map(|parent| {
        quote! { .extends(<#parent as ::gizmo_sql_core::schema::Record>::record_def) }
    });

    quote! {
        impl #impl_generics ::gizmo_sql_core::schema::Record for #struct_name #ty_generics #where_clause {
            fn record_def() -> &'static ::gizmo_sql_core::schema::RecordDef {
                static FIELDS: &[::gizmo_sql_core::schema::FieldDef] = &[
                    #(#field_defs),*
                ];
                static DEF: ::gizmo_sql_core::schema::RecordDef =
                    ::gizmo_sql_core::schema::RecordDef::new(#simple_name)
                        .table(
                            ::gizmo_sql_core::schema::TableAttrs::new()
                                #table_name
                                #catalog
                                #schema
                        )
                        .fields(FIELDS)
                        #extends;
                &DEF
            }
        }
    }
}

#[derive(Clone, Copy)]
enum Shape {
    Scalar,
    Sequence,
    Mapping,
}

struct FieldInfo {
    name: String,
    shape: Shape,
    column_name: Option<String>,
    insertable: bool,
    updatable: bool,
    skip: bool,
}

#[derive(Default)]
struct RecordAttrs {
    table: Option<String>,
    catalog: Option<String>,
    schema: Option<String>,
    extends: Option<Path>,
}

struct ColumnAttrs {
    name: Option<String>,
    rename: Option<String>,
    insertable: bool,
    updatable: bool,
    skip: bool,
    shape: Option<Shape>,
}

fn parse_record_attrs(attrs: &[Attribute]) -> syn::Result<RecordAttrs> {
    let mut result = RecordAttrs::default();
    for attr in attrs {
        if !attr.path().is_ident("record") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("table") {
                result.table = Some(meta.value()?.parse::<LitStr>()?.value());
            } else if meta.path.is_ident("catalog") {
                result.catalog = Some(meta.value()?.parse::<LitStr>()?.value());
            } else if meta.path.is_ident("schema") {
                result.schema = Some(meta.value()?.parse::<LitStr>()?.value());
            } else if meta.path.is_ident("extends") {
                result.extends = Some(meta.value()?.parse::<Path>()?);
            } else {
                return Err(meta.error("unsupported record attribute"));
            }
            Ok(())
        })?;
    }
    Ok(result)
}

fn parse_column_attrs(attrs: &[Attribute]) -> syn::Result<ColumnAttrs> {
    let mut result = ColumnAttrs {
        name: None,
        rename: None,
        insertable: true,
        updatable: true,
        skip: false,
        shape: None,
    };

    for attr in attrs {
        if !attr.path().is_ident("column") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                result.name = Some(meta.value()?.parse::<LitStr>()?.value());
            } else if meta.path.is_ident("rename") {
                result.rename = Some(meta.value()?.parse::<LitStr>()?.value());
            } else if meta.path.is_ident("insertable") {
                result.insertable = meta.value()?.parse::<LitBool>()?.value;
            } else if meta.path.is_ident("updatable") {
                result.updatable = meta.value()?.parse::<LitBool>()?.value;
            } else if meta.path.is_ident("skip") {
                result.skip = true;
            } else if meta.path.is_ident("sequence") {
                result.shape = Some(Shape::Sequence);
            } else if meta.path.is_ident("mapping") {
                result.shape = Some(Shape::Mapping);
            } else if meta.path.is_ident("scalar") {
                result.shape = Some(Shape::Scalar);
            } else {
                return Err(meta.error("unsupported column attribute"));
            }
            Ok(())
        })?;
    }

    Ok(result)
}

const SEQUENCE_TYPES: &[&str] = &[
    "Vec",
    "VecDeque",
    "LinkedList",
    "HashSet",
    "BTreeSet",
    "BinaryHeap",
    "IndexSet",
];

const MAPPING_TYPES: &[&str] = &["HashMap", "BTreeMap", "IndexMap"];

/// Infers the value shape from the outermost type, looking through
/// `Option` and `Box`.
fn infer_shape(ty: &Type) -> Shape {
    let Type::Path(type_path) = ty else {
        return Shape::Scalar;
    };
    let Some(segment) = type_path.path.segments.last() else {
        return Shape::Scalar;
    };
    let ident = segment.ident.to_string();

    if ident == "Option" || ident == "Box" {
        return first_type_argument(&segment.arguments).map_or(Shape::Scalar, infer_shape);
    }
    if ident == "Vec" && first_type_argument(&segment.arguments).is_some_and(is_u8) {
        return Shape::Scalar;
    }
    if SEQUENCE_TYPES.contains(&ident.as_str()) {
        Shape::Sequence
    } else if MAPPING_TYPES.contains(&ident.as_str()) {
        Shape::Mapping
    } else {
        Shape::Scalar
    }
}

fn first_type_argument(arguments: &PathArguments) -> Option<&Type> {
    let PathArguments::AngleBracketed(args) = arguments else {
        return None;
    };
    args.args.iter().find_map(|arg| match arg {
        GenericArgument::Type(ty) => Some(ty),
        _ => None,
    })
}

fn is_u8(ty: &Type) -> bool {
    matches!(ty, Type::Path(p) if p.path.is_ident("u8"))
}

fn to_camel_case(s: &str) -> String {
    let mut result = String::new();
    let mut capitalize_next = false;
    for c in s.chars() {
        if c == '_' {
            capitalize_next = !result.is_empty();
        } else if capitalize_next {
            result.push(c.to_ascii_uppercase());
            capitalize_next = false;
        } else {
            result.push(c);
        }
    }
    result
}
