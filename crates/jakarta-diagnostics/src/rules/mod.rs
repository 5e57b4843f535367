//! The built-in rule catalog, one module per specification family.

use std::sync::Arc;

use crate::rule::Rule;

pub mod annotations;
pub mod bean_validation;
pub mod cdi;
pub mod jaxrs;
pub mod jsonb;
pub mod jsonp;
pub mod persistence;
pub mod servlet;
pub mod websocket;

/// Every built-in rule in registration order.
pub fn builtin() -> Vec<Arc<dyn Rule>> {
    vec![
        Arc::new(cdi::ManagedBeanScope),
        Arc::new(cdi::ScopeDeclaration),
        Arc::new(cdi::ProducerInjectConflict),
        Arc::new(cdi::InjectionParameters),
        Arc::new(cdi::ManagedBeanConstructor),
        Arc::new(jaxrs::ResourceMethodVisibility),
        Arc::new(jaxrs::ResourceMethodEntityParams),
        Arc::new(jaxrs::RootResourceConstructors),
        Arc::new(bean_validation::ConstraintTargetType),
        Arc::new(bean_validation::ConstraintStatic),
        Arc::new(jsonb::JsonbCreatorUniqueness),
        Arc::new(jsonb::JsonbTransientExclusion),
        Arc::new(jsonp::JsonpPointerTarget),
        Arc::new(persistence::MapKeyConflict),
        Arc::new(persistence::MapKeyJoinColumnAttributes),
        Arc::new(persistence::EntityStructure),
        Arc::new(servlet::WebServletSuperclass),
        Arc::new(servlet::WebServletAttributes),
        Arc::new(servlet::WebFilterStructure),
        Arc::new(servlet::WebListenerInterface),
        Arc::new(websocket::ServerEndpointUri),
        Arc::new(websocket::LifecycleParameters),
        Arc::new(annotations::LifecycleCallbacks),
        Arc::new(annotations::ResourceAttributes),
        Arc::new(annotations::GeneratedDate),
    ]
}
