use std::collections::HashMap;

use proc_macro::TokenStream;
use quote::quote;
use syn::{
    Attribute, Data, DeriveInput, Expr, ExprLit, Fields, Ident, Lit, LitStr, Meta, Result, Token,
    Type,
    parse::{Parse, ParseStream},
    parse_macro_input,
    punctuated::Punctuated,
};

/// Derive `argbind::Args` for a struct with named fields.
///
/// This generates:
/// - `definition()`, one descriptor per field in declaration order
/// - `hydrate()`, which builds the struct from the bound values and then calls
///   every post-load hook in order
///
/// Syntax:
///
/// ```ignore
/// #[derive(argbind::Args)]
/// #[args(post_load = "calculate")]
/// struct Callback {
///     #[arg(short = "a")]
///     a: i64,
///     #[arg(long = "second", default = 4)]
///     b: i64,
///     #[arg(default)]
///     files: Vec<String>,
///     #[arg(skip)]
///     sum: i64,
/// }
/// ```
///
/// Field types must implement `argbind::ArgValue`. Skipped fields start from
/// `Default::default()`.
#[proc_macro_derive(Args, attributes(arg, args))]
pub fn derive_args(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand_derive(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// `key` or `key = expr` inside `#[arg(...)]` / `#[args(...)]`.
struct AttrField {
    key: Ident,
    value: Option<Expr>,
}

impl Parse for AttrField {
    fn parse(input: ParseStream) -> Result<Self> {
        let key: Ident = input.parse()?;
        let value = if input.peek(Token![=]) {
            input.parse::<Token![=]>()?;
            Some(input.parse()?)
        } else {
            None
        };
        Ok(Self { key, value })
    }
}

struct AttrList {
    fields: Punctuated<AttrField, Token![,]>,
}

impl Parse for AttrList {
    fn parse(input: ParseStream) -> Result<Self> {
        Ok(Self {
            fields: input.parse_terminated(AttrField::parse, Token![,])?,
        })
    }
}

enum DefaultSpec {
    Trait,
    Str(LitStr),
    Expr(Expr),
}

#[derive(Default)]
struct ArgSpec {
    short: Option<LitStr>,
    long: Option<LitStr>,
    default: Option<DefaultSpec>,
    skip: bool,
}

struct FieldSpec {
    ident: Ident,
    ty: Type,
    name: String,
    arg: ArgSpec,
}

impl FieldSpec {
    fn long(&self) -> String {
        self.arg
            .long
            .as_ref()
            .map(|l| strip_dashes(&l.value()))
            .unwrap_or_else(|| self.name.clone())
    }

    fn short(&self) -> Option<String> {
        self.arg.short.as_ref().map(|s| strip_dashes(&s.value()))
    }
}

fn expand_derive(input: DeriveInput) -> Result<proc_macro2::TokenStream> {
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new(
            input.ident.span(),
            "#[derive(Args)] only supports structs",
        ));
    };
    let Fields::Named(named) = &data.fields else {
        return Err(syn::Error::new(
            input.ident.span(),
            "#[derive(Args)] requires named fields",
        ));
    };

    let hooks = post_load_hooks(&input.attrs)?;

    let mut fields = Vec::new();
    for field in &named.named {
        let Some(ident) = field.ident.clone() else {
            continue;
        };
        let name = ident.to_string().trim_start_matches("r#").to_string();
        fields.push(FieldSpec {
            arg: arg_spec(&field.attrs)?,
            ty: field.ty.clone(),
            ident,
            name,
        });
    }

    check_names(&fields)?;

    let arg_exprs: Vec<proc_macro2::TokenStream> = fields
        .iter()
        .filter(|f| !f.arg.skip)
        .map(arg_expr)
        .collect();

    let inits: Vec<proc_macro2::TokenStream> = fields
        .iter()
        .map(|f| {
            let ident = &f.ident;
            let ty = &f.ty;
            if f.arg.skip {
                quote! { #ident: ::core::default::Default::default() }
            } else {
                let name = LitStr::new(&f.name, proc_macro2::Span::call_site());
                quote! { #ident: bound.take::<#ty>(#name)? }
            }
        })
        .collect();

    let hook_names: Vec<LitStr> = hooks
        .iter()
        .map(|h| LitStr::new(&h.to_string(), h.span()))
        .collect();

    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::argbind::Args for #ident #ty_generics #where_clause {
            fn definition() -> ::core::result::Result<::argbind::Definition, ::argbind::DefinitionError> {
                ::argbind::Definition::builder()
                    #( .arg(#arg_exprs) )*
                    #( .post_load(#hook_names) )*
                    .build()
            }

            #[allow(unused_mut, unused_variables)]
            fn hydrate(mut bound: ::argbind::BoundArgs) -> ::argbind::ParseResult<Self> {
                let mut instance = Self {
                    #( #inits, )*
                };
                #( instance.#hooks(); )*
                ::core::result::Result::Ok(instance)
            }
        }
    })
}

fn arg_expr(f: &FieldSpec) -> proc_macro2::TokenStream {
    let ty = &f.ty;
    let name = LitStr::new(&f.name, proc_macro2::Span::call_site());
    let mut out = quote! {
        ::argbind::arg(#name, <#ty as ::argbind::ArgValue>::TYPE)
    };

    if let Some(long) = &f.arg.long {
        let lit = LitStr::new(&strip_dashes(&long.value()), long.span());
        out.extend(quote! { .long(#lit) });
    }
    if let Some(short) = &f.arg.short {
        let lit = LitStr::new(&strip_dashes(&short.value()), short.span());
        out.extend(quote! { .short(#lit) });
    }

    let default = match &f.arg.default {
        None => return out,
        Some(DefaultSpec::Trait) => quote! {
            <#ty as ::core::default::Default>::default()
        },
        Some(DefaultSpec::Str(lit)) => quote! {
            {
                let value: #ty = ::core::convert::From::from(#lit);
                value
            }
        },
        Some(DefaultSpec::Expr(expr)) => quote! {
            {
                let value: #ty = #expr;
                value
            }
        },
    };
    out.extend(quote! {
        .default_value(::argbind::ArgValue::into_value(#default))
    });
    out
}

fn arg_spec(attrs: &[Attribute]) -> Result<ArgSpec> {
    let mut a = ArgSpec::default();

    for attr in attrs {
        if !attr.path().is_ident("arg") {
            continue;
        }
        // A bare `#[arg]` carries no options.
        if matches!(attr.meta, Meta::Path(_)) {
            continue;
        }
        let list: AttrList = attr.parse_args()?;
        for field in list.fields {
            let key = field.key.to_string();
            match key.as_str() {
                "short" => a.short = Some(expect_string_value(&field)?),
                "long" => a.long = Some(expect_string_value(&field)?),
                "default" => {
                    a.default = Some(match field.value {
                        None => DefaultSpec::Trait,
                        Some(Expr::Lit(ExprLit {
                            lit: Lit::Str(lit), ..
                        })) => DefaultSpec::Str(lit),
                        Some(expr) => DefaultSpec::Expr(expr),
                    })
                }
                "skip" => {
                    expect_no_value(&field)?;
                    a.skip = true;
                }
                other => {
                    return Err(syn::Error::new(
                        field.key.span(),
                        format!("unknown arg field: {other}"),
                    ));
                }
            }
        }
    }

    if a.skip && (a.short.is_some() || a.long.is_some() || a.default.is_some()) {
        return Err(syn::Error::new(
            proc_macro2::Span::call_site(),
            "skipped fields cannot declare short, long or default",
        ));
    }

    Ok(a)
}

fn post_load_hooks(attrs: &[Attribute]) -> Result<Vec<Ident>> {
    let mut hooks = Vec::new();

    for attr in attrs {
        if !attr.path().is_ident("args") {
            continue;
        }
        let list: AttrList = attr.parse_args()?;
        for field in list.fields {
            let key = field.key.to_string();
            match key.as_str() {
                "post_load" => {
                    let lit = expect_string_value(&field)?;
                    let ident: Ident = lit.parse().map_err(|_| {
                        syn::Error::new(lit.span(), "post_load expects a method name")
                    })?;
                    hooks.push(ident);
                }
                other => {
                    return Err(syn::Error::new(
                        field.key.span(),
                        format!("unknown args field: {other}"),
                    ));
                }
            }
        }
    }

    Ok(hooks)
}

/// Reject definitions the runtime builder would refuse anyway, with a span.
fn check_names(fields: &[FieldSpec]) -> Result<()> {
    let args: Vec<&FieldSpec> = fields.iter().filter(|f| !f.arg.skip).collect();

    let mut longs: HashMap<String, &FieldSpec> = HashMap::new();
    for &f in &args {
        let long = f.long();
        if long.is_empty() {
            return Err(syn::Error::new(f.ident.span(), "argument name must not be empty"));
        }
        if let Some(prev) = longs.insert(long.clone(), f) {
            return Err(syn::Error::new(
                f.ident.span(),
                format!("--{long} is already used by field '{}'", prev.name),
            ));
        }
    }

    let mut shorts: HashMap<String, &FieldSpec> = HashMap::new();
    for &f in &args {
        let Some(short) = f.short() else {
            continue;
        };
        if short.is_empty() {
            return Err(syn::Error::new(f.ident.span(), "short name must not be empty"));
        }
        if let Some(other) = longs.get(&short) {
            return Err(syn::Error::new(
                f.ident.span(),
                format!("-{short} collides with the long name of field '{}'", other.name),
            ));
        }
        if let Some(prev) = shorts.insert(short.clone(), f) {
            return Err(syn::Error::new(
                f.ident.span(),
                format!("-{short} is already used by field '{}'", prev.name),
            ));
        }
    }

    Ok(())
}

fn strip_dashes(raw: &str) -> String {
    raw.trim().trim_start_matches('-').to_string()
}

fn expect_string_value(field: &AttrField) -> Result<LitStr> {
    match &field.value {
        Some(Expr::Lit(ExprLit {
            lit: Lit::Str(s), ..
        })) => Ok(s.clone()),
        _ => Err(syn::Error::new(
            field.key.span(),
            format!("expected {} = \"...\"", field.key),
        )),
    }
}

fn expect_no_value(field: &AttrField) -> Result<()> {
    match &field.value {
        None => Ok(()),
        Some(_) => Err(syn::Error::new(
            field.key.span(),
            format!("{} does not take a value", field.key),
        )),
    }
}
