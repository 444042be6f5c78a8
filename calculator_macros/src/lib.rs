use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{parse_macro_input, FnArg, Ident, ItemFn, Pat, PatType, Type};

fn unsupported(span: Span, message: &str) -> TokenStream {
    syn::Error::new(span, message).to_compile_error().into()
}

fn is_f64(ty: &Type) -> bool {
    match ty {
        Type::Path(type_path) => type_path.qself.is_none() && type_path.path.is_ident("f64"),
        _ => false,
    }
}

/// Turns `fn name(a: f64, b: f64) -> Result<f64, FunctionError>` into a
/// builtin with the uniform signature `fn name(args: &[f64]) -> Result<f64, FunctionError>`.
///
/// The generated function checks the argument count before binding the
/// parameters positionally, so `FunctionError` must be in scope at the call site.
#[proc_macro_attribute]
pub fn builtin_fn(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    let fn_vis = &input.vis;
    let fn_attrs = &input.attrs;
    let fn_name = &input.sig.ident;
    let fn_body = &input.block;
    let fn_output = &input.sig.output;

    let mut arg_names: Vec<Ident> = Vec::new();

    for arg in &input.sig.inputs {
        match arg {
            FnArg::Typed(PatType { pat, ty, .. }) => {
                let arg_name = match &**pat {
                    Pat::Ident(ident) => ident.ident.clone(),
                    _ => {
                        return unsupported(
                            Span::call_site(),
                            "builtin arguments must be plain identifiers",
                        )
                    }
                };
                if !is_f64(ty) {
                    return unsupported(
                        arg_name.span(),
                        &format!("argument '{arg_name}' of '{fn_name}' must be f64"),
                    );
                }
                arg_names.push(arg_name);
            }
            FnArg::Receiver(_) => {
                return unsupported(fn_name.span(), "builtins cannot take self");
            }
        }
    }

    let args_len = arg_names.len();
    let expanded = quote! {
        #(#fn_attrs)*
        #fn_vis fn #fn_name(args: &[f64]) #fn_output {
            let &[#(#arg_names),*] = args else {
                return Err(FunctionError::Arity {
                    expected: #args_len,
                    found: args.len(),
                });
            };

            #fn_body
        }
    };

    TokenStream::from(expanded)
}
