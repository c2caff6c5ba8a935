use proc_macro2::TokenStream;
use quote::{ToTokens, quote};

use super::{
  Visibility,
  responses::{render_expr, variant_pattern},
};
use crate::generator::{
  ast::{
    OperationDef, ParameterDef, ParameterLocation, ParameterStyle, RequestBodyDef, RequestBodyKind, ResponseEnumDef,
    RouteTableDef, RustType, TypeToken,
  },
  converter::ConversionOutput,
};

/// The whole `server.rs`: path enums, route tables, the `Api` trait, response
/// rendering and the `handle` dispatcher.
pub(crate) struct ServerFragment<'a> {
  output: &'a ConversionOutput,
  visibility: Visibility,
}

impl<'a> ServerFragment<'a> {
  pub(crate) fn new(output: &'a ConversionOutput, visibility: Visibility) -> Self {
    Self { output, visibility }
  }

  fn responses(&self) -> impl Iterator<Item = &'a ResponseEnumDef> {
    self.output.types.iter().filter_map(|rust_type| match rust_type {
      RustType::Response(def) => Some(def),
      _ => None,
    })
  }

  fn operation_for(&self, table: &RouteTableDef, variant: &TypeToken) -> Option<&'a OperationDef> {
    self
      .output
      .operations
      .iter()
      .find(|operation| operation.method == table.method && operation.path_variant == *variant)
  }

  fn route_tables(&self) -> TokenStream {
    let vis = self.visibility;
    let tables = self.output.route_tables.iter().map(|table| {
      let enum_name = &table.enum_name;
      let static_name = &table.static_name;
      let variants = table.routes.iter().map(|route| &route.variant);
      let inserts = table.routes.iter().map(|route| {
        let pattern = &route.pattern;
        let variant = &route.variant;
        quote! { let _ = router.insert(#pattern, #enum_name::#variant); }
      });
      let docs = format!(" Routed paths for `{}` requests.", table.method);

      quote! {
        #[doc = #docs]
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        #vis enum #enum_name {
          #(#variants),*
        }

        static #static_name: std::sync::LazyLock<support::Router<#enum_name>> = std::sync::LazyLock::new(|| {
          let mut router = support::Router::new();
          #(#inserts)*
          router
        });
      }
    });

    quote! { #(#tables)* }
  }

  fn api_trait(&self) -> TokenStream {
    let vis = self.visibility;
    let methods = self.output.operations.iter().map(api_method);

    quote! {
      /// Implemented by the application; one method per operation.
      #vis trait Api: Send + Sync {
        #(#methods)*
      }
    }
  }

  fn response_impls(&self) -> TokenStream {
    let impls = self.responses().map(|def| {
      let name = &def.name;
      let arms = def.variants.iter().map(|variant| {
        let pattern = variant_pattern(variant);
        let render = render_expr(variant);
        quote! { #pattern => #render }
      });

      quote! {
        impl support::IntoHttpResponse for #name {
          fn into_http_response(self) -> std::result::Result<support::http::Response<support::Bytes>, support::RequestError> {
            let status = self.status_code();
            match self {
              #(#arms),*
            }
          }
        }
      }
    });

    quote! { #(#impls)* }
  }

  fn dispatcher(&self) -> TokenStream {
    let vis = self.visibility;
    let method_arms = self.output.route_tables.iter().map(|table| self.method_arm(table));
    let mut lookups = self.output.route_tables.iter().map(|table| {
      let static_name = &table.static_name;
      quote! { #static_name.at(path).is_some() }
    });
    let routed = match lookups.next() {
      Some(first) => quote! { #first #(|| #lookups)* },
      None => quote! { false },
    };

    quote! {
      /// Routes `request`, binds its arguments, awaits the operation and renders
      /// the result. Binding and operation failures become JSON error responses.
      #vis async fn handle<A, B>(api: &A, request: support::http::Request<B>) -> support::http::Response<support::Bytes>
      where
        A: Api,
        B: support::http_body::Body<Data = support::Bytes> + Send + 'static,
        B::Error: Into<support::BoxError>,
      {
        match dispatch(api, request).await {
          Ok(response) => response,
          Err(error) => error.into_response(),
        }
      }

      #[allow(unused_variables)]
      async fn dispatch<A, B>(
        api: &A,
        request: support::http::Request<B>,
      ) -> std::result::Result<support::http::Response<support::Bytes>, support::RequestError>
      where
        A: Api,
        B: support::http_body::Body<Data = support::Bytes> + Send + 'static,
        B::Error: Into<support::BoxError>,
      {
        let (parts, body) = request.into_parts();
        let path = parts.uri.path();
        let query = support::QueryParams::parse(parts.uri.query());

        match parts.method.as_str() {
          #(#method_arms)*
          _ => Err(unrouted(&parts.method, path)),
        }
      }

      fn unrouted(method: &support::http::Method, path: &str) -> support::RequestError {
        let routed = #routed;
        if routed {
          support::RequestError::MethodNotAllowed {
            method: method.clone(),
            path: path.to_string(),
          }
        } else {
          support::RequestError::NotFound { path: path.to_string() }
        }
      }
    }
  }

  fn method_arm(&self, table: &RouteTableDef) -> TokenStream {
    let method = table.method.as_str();
    let static_name = &table.static_name;
    let enum_name = &table.enum_name;

    let arms = table.routes.iter().map(|route| {
      let variant = &route.variant;
      let call = match self.operation_for(table, variant) {
        Some(operation) => operation_call(operation),
        None => quote! { Err(unrouted(&parts.method, path)) },
      };
      quote! { #enum_name::#variant => #call }
    });

    quote! {
      #method => {
        let Some(matched) = #static_name.at(path) else {
          return Err(unrouted(&parts.method, path));
        };
        match matched.value {
          #(#arms),*
        }
      }
    }
  }
}

impl ToTokens for ServerFragment<'_> {
  fn to_tokens(&self, tokens: &mut TokenStream) {
    let route_tables = self.route_tables();
    let api_trait = self.api_trait();
    let response_impls = self.response_impls();
    let dispatcher = self.dispatcher();

    tokens.extend(quote! {
      use oas3_scaffold_support::{self as support, IntoHttpResponse};

      use super::types::*;

      #route_tables
      #api_trait
      #response_impls
      #dispatcher
    });
  }
}

fn api_method(operation: &OperationDef) -> TokenStream {
  let name = &operation.name;
  let docs = &operation.docs;
  let response = &operation.response;

  let parameters = operation.parameters.iter().map(|parameter| {
    let ident = &parameter.name;
    let ty = parameter.argument_type();
    quote! { #ident: #ty }
  });
  let body = operation.body.as_ref().map(|body| {
    let ident = &body.name;
    let ty = body
      .argument_type()
      .map_or_else(|| quote! { support::RawBody }, |ty| ty.into_token_stream());
    quote! { #ident: #ty }
  });
  let arguments = parameters.chain(body);

  quote! {
    #docs
    fn #name(&self, #(#arguments),*) -> impl std::future::Future<Output = anyhow::Result<#response>> + Send;
  }
}

fn operation_call(operation: &OperationDef) -> TokenStream {
  let name = &operation.name;
  let arguments = operation
    .parameters
    .iter()
    .map(parameter_expr)
    .chain(operation.body.as_ref().map(body_expr));

  quote! {
    api
      .#name(#(#arguments),*)
      .await
      .map_err(support::RequestError::operation)?
      .into_http_response()
  }
}

fn parameter_expr(parameter: &ParameterDef) -> TokenStream {
  let name = &parameter.original_name;
  let array_style = |style| match style {
    ParameterStyle::Delimited => quote! { support::ArrayStyle::Delimited },
    _ => quote! { support::ArrayStyle::Repeated },
  };

  match (parameter.location, parameter.style, parameter.required) {
    (ParameterLocation::Path, ..) => quote! { support::path_param(&matched.params, #name)? },
    (ParameterLocation::Query, ParameterStyle::Single, true) => quote! { support::query_param(&query, #name)? },
    (ParameterLocation::Query, ParameterStyle::Single, false) => {
      quote! { support::optional_query_param(&query, #name)? }
    }
    (ParameterLocation::Query, style, true) => {
      let style = array_style(style);
      quote! { support::query_values(&query, #name, #style)? }
    }
    (ParameterLocation::Query, style, false) => {
      let style = array_style(style);
      quote! { support::optional_query_values(&query, #name, #style)? }
    }
  }
}

fn body_expr(body: &RequestBodyDef) -> TokenStream {
  match body.kind {
    RequestBodyKind::Json { required: true, .. } => quote! { support::read_json(body).await? },
    RequestBodyKind::Json { required: false, .. } => quote! { support::read_optional_json(body).await? },
    RequestBodyKind::Raw => quote! { support::raw_body(body) },
  }
}
