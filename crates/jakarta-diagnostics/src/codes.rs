//! Stable error codes, grouped by specification family.

pub mod cdi {
    pub const INVALID_MANAGED_BEAN_ANNOTATION: &str = "InvalidManagedBeanAnnotation";
    pub const INVALID_SCOPE_DECL: &str = "InvalidScopeDecl";
    pub const REMOVE_PRODUCES_OR_INJECT: &str = "RemoveProducesOrInject";
    pub const REMOVE_INVALID_INJECT_PARAM_ANNOTATION: &str = "RemoveInvalidInjectParamAnnotation";
    pub const REMOVE_INVALID_PRODUCER_PARAM_ANNOTATION: &str =
        "RemoveInvalidProducerParamAnnotation";
    pub const INVALID_MANAGED_BEAN_CONSTRUCTOR: &str = "InvalidManagedBeanConstructor";
    pub const INVALID_MULTIPLE_INJECT_CONSTRUCTORS: &str = "InvalidMultipleInjectConstructors";
}

pub mod jaxrs {
    pub const NON_PUBLIC_RESOURCE_METHOD: &str = "NonPublicResourceMethod";
    pub const RESOURCE_METHOD_MULTIPLE_ENTITY_PARAMS: &str = "ResourceMethodMultipleEntityParams";
    pub const NO_PUBLIC_CONSTRUCTORS: &str = "NoPublicConstructors";
}

pub mod bean_validation {
    pub const FIX_TYPE_OF_ELEMENT: &str = "FixTypeOfElement";
    pub const MAKE_NOT_STATIC: &str = "MakeNotStatic";
}

pub mod jsonb {
    pub const MULTIPLE_JSONB_CREATOR_ANNOTATIONS: &str = "MultipleJsonbCreatorAnnotations";
    pub const INVALID_JSONB_TRANSIENT_ANNOTATION: &str = "InvalidJsonbTransientAnnotation";
}

pub mod jsonp {
    pub const INVALID_JSON_CREATE_POINTER_TARGET: &str = "InvalidJsonCreatePointerTarget";
}

pub mod persistence {
    pub const REMOVE_MAPKEY_OR_MAPKEY_CLASS: &str = "RemoveMapKeyorMapKeyClass";
    pub const MISSING_ATTRIBUTES: &str = "MissingAttributes";
    pub const MISSING_EMPTY_CONSTRUCTOR: &str = "MissingEmptyConstructor";
    pub const REMOVE_FINAL_MODS: &str = "RemoveFinalMods";
}

pub mod servlet {
    pub const EXTEND_HTTP_SERVLET: &str = "ExtendHttpServlet";
    pub const COMPLETE_HTTP_SERVLET_ATTRIBUTES: &str = "CompleteHttpServletAttributes";
    pub const INVALID_HTTP_SERVLET_ATTRIBUTE: &str = "InvalidHttpServletAttribute";
    pub const IMPLEMENT_FILTER: &str = "ImplementFilter";
    pub const COMPLETE_FILTER_ANNOTATION: &str = "CompleteFilterAnnotation";
    pub const INVALID_FILTER_ANNOTATION_ATTRIBUTE: &str = "InvalidFilterAnnotationAttribute";
    pub const WEB_LISTENER_MUST_IMPLEMENT_CORRECT_INTERFACE: &str =
        "WebListenerMustImplementCorrectInterface";
}

pub mod websocket {
    pub const INVALID_ENDPOINT_URI: &str = "InvalidEndpointURI";
    pub const ADD_PATH_PARAMS_ANNOTATION: &str = "AddPathParamsAnnotation";
    pub const CHANGE_INVALID_PARAM_TYPE: &str = "ChangeInvalidParamType";
}

pub mod annotations {
    pub const POST_CONSTRUCT_PARAMS: &str = "PostConstructParams";
    pub const POST_CONSTRUCT_RETURN_TYPE: &str = "PostConstructReturnType";
    pub const POST_CONSTRUCT_EXCEPTION: &str = "PostConstructException";
    pub const PRE_DESTROY_PARAMS: &str = "PreDestroyParams";
    pub const PRE_DESTROY_STATIC: &str = "PreDestroyStatic";
    pub const PRE_DESTROY_EXCEPTION: &str = "PreDestroyException";
    pub const MISSING_RESOURCE_NAME_ATTRIBUTE: &str = "MissingResourceNameAttribute";
    pub const MISSING_RESOURCE_TYPE_ATTRIBUTE: &str = "MissingResourceTypeAttribute";
    pub const INVALID_DATE_FORMAT: &str = "InvalidDateFormat";
}
