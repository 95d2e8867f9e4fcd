//! `#[injectable]` 实现
//!
//! 从实现块中收集 `#[inject]` 标记的构造器和方法，生成
//! `InjectionPoints` 实现。没有参数接收者的 `#[inject]` 函数是构造器，
//! 其余是注入方法：恰好一个参数的方法作为 setter 调用，其他参数个数的
//! 方法只做记录，装配阶段会跳过。

use crate::utils::{has_attribute, is_result_type, unwrap_type};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    parse_macro_input, Error, FnArg, ImplItem, ImplItemFn, ItemImpl, Result, ReturnType, Type,
};

/// 实现 #[injectable] 宏
pub fn injectable_impl(args: TokenStream, input: TokenStream) -> TokenStream {
    if !args.is_empty() {
        return Error::new(proc_macro2::Span::call_site(), "#[injectable] 不接受参数")
            .into_compile_error()
            .into();
    }

    let mut item_impl = parse_macro_input!(input as ItemImpl);
    match expand(&mut item_impl) {
        Ok(injection_points) => quote! {
            #item_impl

            #injection_points
        }
        .into(),
        Err(error) => {
            let error = error.into_compile_error();
            quote! {
                #item_impl

                #error
            }
            .into()
        }
    }
}

fn expand(item_impl: &mut ItemImpl) -> Result<TokenStream2> {
    if let Some((_, path, _)) = &item_impl.trait_ {
        return Err(Error::new_spanned(path, "#[injectable] 只能用于固有实现块"));
    }
    if !item_impl.generics.params.is_empty() {
        return Err(Error::new_spanned(&item_impl.generics, "组件不支持泛型参数"));
    }

    let mut constructor: Option<TokenStream2> = None;
    let mut methods = Vec::new();

    for item in &mut item_impl.items {
        let ImplItem::Fn(method) = item else {
            continue;
        };
        if !has_attribute(&method.attrs, "inject") {
            continue;
        }
        method.attrs.retain(|attr| !attr.path().is_ident("inject"));

        if method.sig.receiver().is_none() {
            if constructor.is_some() {
                return Err(Error::new_spanned(&method.sig, "只能有一个 #[inject] 构造器"));
            }
            constructor = Some(constructor_tokens(method)?);
        } else {
            methods.push(method_tokens(method)?);
        }
    }

    let constructor = constructor.unwrap_or_else(|| quote! { .default_constructor() });
    let self_ty = &item_impl.self_ty;

    Ok(quote! {
        impl ::di_abstractions::InjectionPoints for #self_ty {
            fn contribute(
                builder: ::di_abstractions::ComponentBuilder<Self>,
            ) -> ::di_abstractions::ComponentBuilder<Self> {
                builder
                    #constructor
                    #(#methods)*
            }
        }
    })
}

/// 参数类型列表（不含接收者）
fn parameter_types(method: &ImplItemFn) -> Vec<&Type> {
    method
        .sig
        .inputs
        .iter()
        .filter_map(|input| match input {
            FnArg::Typed(pat_type) => Some(&*pat_type.ty),
            FnArg::Receiver(_) => None,
        })
        .collect()
}

/// 构造器：参数必须是 `Option<Arc<T>>`，返回 `Self` 或 `Result<Self, E>`
fn constructor_tokens(method: &ImplItemFn) -> Result<TokenStream2> {
    let name = &method.sig.ident;

    let mut dependencies = Vec::new();
    for ty in parameter_types(method) {
        let dependency = unwrap_type(ty, "Option")
            .and_then(|arc| unwrap_type(arc, "Arc"))
            .ok_or_else(|| Error::new_spanned(ty, "构造器参数必须是 Option<Arc<T>>"))?;
        dependencies.push(dependency);
    }

    let args = if dependencies.is_empty() {
        quote! { _args }
    } else {
        quote! { args }
    };
    let resolved = dependencies
        .iter()
        .map(|dependency| quote! { #args.get::<#dependency>() });
    let call = quote! { Self::#name(#(#resolved),*) };
    let body = match &method.sig.output {
        ReturnType::Type(_, ty) if is_result_type(ty) => quote! {
            #call.map_err(|error| {
                ::infrastructure_common::ComponentError::construction_failed(
                    ::std::any::type_name::<Self>(),
                    error,
                )
            })
        },
        ReturnType::Type(..) => quote! { ::std::result::Result::Ok(#call) },
        ReturnType::Default => {
            return Err(Error::new_spanned(&method.sig, "构造器必须返回 Self 或 Result<Self, E>"));
        }
    };

    Ok(quote! {
        .constructor(
            ::std::vec![#(::infrastructure_common::TypeInfo::of::<#dependencies>()),*],
            |#args: &::di_abstractions::ConstructorArgs<'_>| #body,
        )
    })
}

/// 注入方法：单参数 `Arc<T>` 方法生成 setter，其余记录为跳过
fn method_tokens(method: &ImplItemFn) -> Result<TokenStream2> {
    let name = &method.sig.ident;
    let method_name = name.to_string();
    let parameters = parameter_types(method);

    if let [ty] = parameters.as_slice() {
        let dependency = unwrap_type(ty, "Arc")
            .ok_or_else(|| Error::new_spanned(ty, "注入方法的参数必须是 Arc<T>"))?;
        return Ok(quote! {
            .setter::<#dependency, _>(
                #method_name,
                |bean: &Self, dependency: ::std::sync::Arc<#dependency>| {
                    bean.#name(dependency);
                },
            )
        });
    }

    Ok(quote! {
        .skipped_method(
            #method_name,
            ::std::vec![#(::infrastructure_common::TypeInfo::of::<#parameters>()),*],
        )
    })
}
