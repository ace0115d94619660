use std::ops::Deref;

use anyhow::anyhow;
use proc_macro2::{Ident, Span, TokenStream};
use quote::{ToTokens, format_ident, quote};
use rust_format::Formatter;

use crate::codemodel::{
    Codemodel, EnumCaseKind, Indirection, Module, NamedItem, TypeRef,
    function::{Function, FunctionParam},
    implementation::Implementation,
    trait_::Trait,
};

// useful read on working with proc_macro2, quote and syn:
// https://petanode.com/posts/rust-proc-macro/

pub(crate) fn write_to_token_stream(
    cm: &Codemodel,
    crate_name: &str,
) -> anyhow::Result<TokenStream> {
    let mod_ = cm
        .find_crate(crate_name)
        .ok_or(anyhow!(format!("crate {crate_name} not found")))?;

    write_module(&mod_)
}

fn write_module(mod_: &Module) -> anyhow::Result<TokenStream> {
    let mut decls = Vec::new();
    for t in mod_.type_iter() {
        decls.push(write_type_decl(t)?);
    }
    for t in mod_.trait_iter() {
        decls.push(write_trait_decl(t)?);
    }
    for i in mod_.impl_iter() {
        decls.push(write_impl_decl(i)?);
    }

    let mut ts = TokenStream::new();
    ts.extend(decls);
    Ok(ts)
}

fn write_type_decl(type_ref: &TypeRef) -> anyhow::Result<TokenStream> {
    let ts = match type_ref {
        TypeRef::Struct(s) => {
            let struct_name = format_ident!("{}", s.name());
            let attrs = write_attrs(s.attr_iter().map(|a| a.to_token_stream()));
            let mut struct_fields = Vec::new();

            for f in s.field_iter() {
                let field_name = Ident::new(&f.name(), Span::call_site());
                let syn_type_ref = syn_type_name_of(f.type_())?;
                let field_type: TokenStream = syn_type_ref.to_token_stream();
                struct_fields.push(quote!(pub #field_name: #field_type));
            }
            quote!(#attrs pub struct #struct_name {
                #(#struct_fields),*
            })
        }
        TypeRef::Enum(e) => {
            let enum_name = format_ident!("{}", e.name());
            let attrs = write_attrs(e.attr_iter().map(|a| a.to_token_stream()));
            let mut cases = Vec::new();
            for c in e.case_iter() {
                let case_name = format_ident!("{}", c.name());
                let case_attrs = write_attrs(c.attr_iter().map(|a| a.to_token_stream()));
                let case_ts = match c.kind() {
                    EnumCaseKind::Unit => quote!(#case_attrs #case_name),
                    EnumCaseKind::Tuple(types) => {
                        let fields = types
                            .iter()
                            .map(syn_type_name_of)
                            .collect::<anyhow::Result<Vec<_>>>()?;
                        quote!(#case_attrs #case_name(#(#fields),*))
                    }
                    EnumCaseKind::TupleRaw(types) => {
                        quote!(#case_attrs #case_name(#(#types),*))
                    }
                };
                cases.push(case_ts);
            }
            quote!(#attrs pub enum #enum_name {
                #(#cases),*
            })
        }
        TypeRef::Alias(alias) => {
            let alias_name = Ident::new(&alias.name(), Span::call_site());
            let target_name = syn_type_name_of(alias.target())?;
            quote!(type #alias_name = #target_name;)
        }
        TypeRef::Indirection(ind) => match ind.borrow().deref() {
            Indirection::Stub(_) => {
                return Err(anyhow!(
                    "type stub {ind:?} was never resolved into a concrete declaration"
                ))
            }
            Indirection::Resolved(type_ref) => write_type_decl(type_ref)?,
        },
        _ => return Err(anyhow!("unsupported type declaration {type_ref:?}")),
    };
    Ok(ts)
}

fn write_trait_decl(t: &Trait) -> anyhow::Result<TokenStream> {
    let trait_name = format_ident!("{}", t.name());
    let attrs = write_attrs(t.attr_iter().map(|a| a.to_token_stream()));
    let mut fns = Vec::new();
    for f in t.function_iter() {
        fns.push(write_function(f)?);
    }
    Ok(quote!(#attrs pub trait #trait_name {
        #(#fns)*
    }))
}

fn write_impl_decl(i: &Implementation) -> anyhow::Result<TokenStream> {
    let implementing_type = syn_type_name_of(&i.implementing_type)?;
    let mut fns = Vec::new();
    for f in &i.associated_functions {
        fns.push(write_function(f)?);
    }
    let ts = match &i.impl_trait {
        Some(trait_ref) => {
            let trait_name = format_ident!("{}", trait_ref.name());
            quote!(impl #trait_name for #implementing_type {
                #(#fns)*
            })
        }
        None => quote!(impl #implementing_type {
            #(#fns)*
        }),
    };
    Ok(ts)
}

fn write_function(f: &Function) -> anyhow::Result<TokenStream> {
    let fn_name = format_ident!("{}", f.name());
    let mut params = Vec::new();
    for p in f.function_params_iter() {
        params.push(write_function_param(p)?);
    }
    let return_type = syn_type_name_of(f.return_type())?;
    let signature = quote!(fn #fn_name(#(#params),*) -> #return_type);
    let ts = match f.body() {
        Some(body) => quote!(#signature { #body }),
        None => quote!(#signature;),
    };
    Ok(ts)
}

fn write_function_param(p: &FunctionParam) -> anyhow::Result<TokenStream> {
    if p.name == "self" || matches!(p.type_, TypeRef::SelfType) {
        return Ok(quote!(&self));
    }
    let param_name = format_ident!("{}", p.name);
    let param_type = syn_type_name_of(&p.type_)?;
    Ok(quote!(#param_name: #param_type))
}

fn write_attrs(attrs: impl Iterator<Item = TokenStream>) -> TokenStream {
    let mut ts = TokenStream::new();
    ts.extend(attrs);
    ts
}

/// renders a token stream as formatted Rust source, for diagnostics/logging.
pub(crate) fn fmt_code(ts: TokenStream) -> anyhow::Result<String> {
    Ok(rust_format::RustFmt::default().format_tokens(ts)?)
}

fn syn_type_name_of(type_ref: &TypeRef) -> anyhow::Result<TokenStream> {
    let syn_type = syn::parse_str::<syn::Type>(&type_ref.name())?;
    let ts = syn_type.to_token_stream();
    Ok(ts)
}

#[test]
fn test_write_code() -> anyhow::Result<()> {
    use crate::codemodel::{Module, StructBuilder};
    use assert_tokenstreams_eq::assert_tokenstreams_eq;

    let mut cm = Codemodel::new();
    let mut m = Module::new("crate");

    // forward declare 'Bar'
    let bar_t = m.insert_type_stub("Bar")?;

    // insert an alias to forward-declared 'Bar'
    let bar_alias_t = m.insert_type_alias("BarAlias", bar_t.clone())?;

    // insert 'Foo' that also references 'Bar';
    let foo_struct = StructBuilder::new("Foo")
        .field("bar", bar_t)?
        .field("bar_alias", bar_alias_t)?
        .field("name", cm.type_string())?
        .field(
            "other_names",
            cm.type_instance(&cm.type_vec(), &vec![cm.type_string()]),
        )?
        .field("zab", cm.type_u8())?
        .build()?;
    m.insert_struct(foo_struct)?;

    let bar_struct = StructBuilder::new("Bar")
        .field("has_handles", cm.type_bool())?
        .build()?;
    m.insert_struct(bar_struct)?;

    cm.insert_crate(m)?;

    let ts = write_to_token_stream(&cm, "crate")?;
    println!("{ts}");

    let ts_reference = quote!(
        pub struct Bar {
            pub has_handles: bool,
        }
        type BarAlias = Bar;
        pub struct Foo {
            pub bar: Bar,
            pub bar_alias: BarAlias,
            pub name: String,
            pub other_names: Vec<String>,
            pub zab: u8,
        }
    );
    assert_tokenstreams_eq!(&ts, &ts_reference);
    Ok(())
}

#[test]
fn test_write_enum_trait_impl() -> anyhow::Result<()> {
    use crate::codemodel::{
        EnumBuilder, Module, PushFunction, StructBuilder, implementation::ImplementationBuilder,
        trait_::TraitBuilder,
    };
    use assert_tokenstreams_eq::assert_tokenstreams_eq;

    let cm = Codemodel::new();
    let mut m = Module::new("crate");

    let shape_enum = EnumBuilder::new("Shape")
        .unit_variant("Circle")?
        .tuple_variant("Square", vec![cm.type_f64()])?
        .build()?;
    m.insert_enum(shape_enum)?;

    let greeter_struct = StructBuilder::new("Greeter").build()?;
    let greeter_type = m.insert_struct(greeter_struct)?;

    let mut greet_fn = crate::codemodel::function::FunctionBuilder::new(
        "greet".to_string(),
        cm.type_unit(),
    )
    .param("self".to_string(), cm.type_ref_self());
    greet_fn.body(quote!(()));

    let greeter_trait = TraitBuilder::new("Greets")
        .function(
            crate::codemodel::function::FunctionBuilder::new("greet".to_string(), cm.type_unit())
                .param("self".to_string(), cm.type_ref_self())
                .build(),
        )
        .build()?;
    let greeter_trait = m.insert_trait(greeter_trait)?;

    let greeter_impl = ImplementationBuilder::new_trait(greeter_trait, greeter_type)
        .function(greet_fn.build())
        .build();
    m.insert_implementation(greeter_impl)?;

    let ts = write_module(&m)?;

    let ts_reference = quote!(
        pub enum Shape {
            Circle,
            Square(f64)
        }
        pub struct Greeter {}
        pub trait Greets {
            fn greet(&self) -> ();
        }
        impl Greets for Greeter {
            fn greet(&self) -> () { () }
        }
    );
    assert_tokenstreams_eq!(&ts, &ts_reference);
    Ok(())
}
