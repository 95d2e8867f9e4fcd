//! `#[derive(Component)]` 实现

use crate::utils::{has_attribute, last_segment_is, registration_fn_ident, to_lower_camel};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{
    parenthesized, punctuated::Punctuated, Data, DeriveInput, Error, Fields, LitStr, Result,
    Token, Type,
};

/// `#[component(...)]` 参数
#[derive(Default)]
struct ComponentArgs {
    /// 自定义 bean 名称
    name: Option<LitStr>,
    /// 组件对外提供的接口
    implements: Vec<Type>,
    /// 构造器与 setter 由 `#[injectable]` 实现块提供
    injectable: bool,
}

impl ComponentArgs {
    fn from_attrs(input: &DeriveInput) -> Result<Self> {
        let mut args = Self::default();

        for attr in input.attrs.iter().filter(|attr| attr.path().is_ident("component")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    args.name = Some(meta.value()?.parse()?);
                    Ok(())
                } else if meta.path.is_ident("implements") {
                    let content;
                    parenthesized!(content in meta.input);
                    let interfaces = Punctuated::<Type, Token![,]>::parse_terminated(&content)?;
                    args.implements.extend(interfaces);
                    Ok(())
                } else if meta.path.is_ident("injectable") {
                    args.injectable = true;
                    Ok(())
                } else {
                    Err(meta.error("未知的 component 参数，可用参数: name, implements, injectable"))
                }
            })?;
        }

        Ok(args)
    }
}

/// 实现 #[derive(Component)] 宏
pub fn derive_component_impl(input: DeriveInput) -> TokenStream {
    expand(&input).unwrap_or_else(Error::into_compile_error)
}

fn expand(input: &DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(Error::new_spanned(&input.generics, "组件不支持泛型参数"));
    }

    let Data::Struct(data) = &input.data else {
        return Err(Error::new_spanned(struct_name, "#[derive(Component)] 只能用于结构体"));
    };

    let args = ComponentArgs::from_attrs(input)?;
    let bean_name = args
        .name
        .as_ref()
        .map_or_else(|| to_lower_camel(&struct_name.to_string()), LitStr::value);

    let injections = field_injections(&data.fields)?;

    // 未声明 injectable 时由派生宏提供默认的 InjectionPoints 实现；
    // 若同时存在 #[injectable] 实现块，两个实现冲突，编译失败
    let default_injection_points = if args.injectable {
        quote! {}
    } else {
        quote! {
            impl ::di_abstractions::InjectionPoints for #struct_name {
                fn contribute(
                    builder: ::di_abstractions::ComponentBuilder<Self>,
                ) -> ::di_abstractions::ComponentBuilder<Self> {
                    builder.default_constructor()
                }
            }
        }
    };

    let interfaces = args.implements.iter().map(|interface| {
        quote! {
            .implements::<#interface>(|bean| bean as ::std::sync::Arc<#interface>)
        }
    });

    let registration_fn = registration_fn_ident(struct_name);

    Ok(quote! {
        impl ::infrastructure_common::Component for #struct_name {
            fn name(&self) -> &'static str {
                #bean_name
            }
        }

        #default_injection_points

        impl ::di_abstractions::ComponentDefinition for #struct_name {
            fn descriptor() -> ::di_abstractions::ComponentDescriptor {
                let builder = ::di_abstractions::ComponentDescriptor::builder::<Self>()
                    .name(#bean_name)
                    .namespace(::core::module_path!());
                <Self as ::di_abstractions::InjectionPoints>::contribute(builder)
                    #(#interfaces)*
                    #(#injections)*
                    .build()
            }
        }

        // 程序启动时把组件登记到全局目录
        #[::ctor::ctor]
        fn #registration_fn() {
            ::di_abstractions::register_component(
                <#struct_name as ::di_abstractions::ComponentDefinition>::descriptor,
            );
        }
    })
}

/// 生成 `#[autowired]` 与 `#[value("key")]` 字段的注入点
fn field_injections(fields: &Fields) -> Result<Vec<TokenStream>> {
    let mut injections = Vec::new();

    let named = match fields {
        Fields::Named(named) => &named.named,
        Fields::Unit => return Ok(injections),
        Fields::Unnamed(_) => {
            if fields.iter().any(|field| {
                has_attribute(&field.attrs, "autowired") || has_attribute(&field.attrs, "value")
            }) {
                return Err(Error::new_spanned(fields, "注入字段必须是具名字段"));
            }
            return Ok(injections);
        }
    };

    for field in named {
        let Some(ident) = &field.ident else {
            continue;
        };
        let field_name = ident.to_string();

        for attr in &field.attrs {
            if attr.path().is_ident("autowired") {
                if !last_segment_is(&field.ty, "Autowired") {
                    return Err(Error::new_spanned(&field.ty, "#[autowired] 字段必须是 Autowired<T> 类型"));
                }
                injections.push(quote! {
                    .autowired(#field_name, |bean: &Self| &bean.#ident)
                });
            } else if attr.path().is_ident("value") {
                if !last_segment_is(&field.ty, "Value") {
                    return Err(Error::new_spanned(&field.ty, "#[value] 字段必须是 Value 类型"));
                }
                let key: LitStr = attr.parse_args()?;
                if key.value().is_empty() {
                    return Err(Error::new_spanned(&key, "配置键不能为空"));
                }
                injections.push(quote! {
                    .value(#field_name, #key, |bean: &Self| &bean.#ident)
                });
            }
        }
    }

    Ok(injections)
}
