use thiserror::Error;

/// A single validation failure, located well enough to find the offending node.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Unsupported Version: {0}")]
    UnsupportedVersion(f64),

    #[error("Environment Variable {name} Not Set For Field: {field}")]
    MissingEnvVar { name: String, field: String },

    #[error("Failed To Resolve Hostname For Field {field}: {source}")]
    HostnameLookup {
        field: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid Service Entry For Service: {0}")]
    InvalidService(String),

    #[error("Failed Validating Startup Actions: {0}")]
    StartupActions(#[source] Box<ValidationError>),

    #[error("Action Not Supported: {0}")]
    ActionNotSupported(String),

    #[error("Invalid Request Value For Request Action")]
    InvalidRequestAction,

    #[error("No Target Defined For Request Action")]
    MissingActionTarget,

    #[error("Service Not Defined For Request Action: {0}")]
    UndefinedActionService(String),

    #[error("No Request ID Defined For Request Action")]
    MissingActionRequestId,

    #[error("Request ID Not Defined For Request Action {0}")]
    UndefinedActionRequest(String),

    #[error("Invalid Delay Value For Request Action: {0}")]
    InvalidDelay(String),

    #[error("Request Name Is Empty")]
    EmptyRequestName,

    #[error("URL For Request {0} Is Empty")]
    EmptyRequestUrl(String),

    #[error("Method {method} For Request {request} Not Supported")]
    UnsupportedMethod { request: String, method: String },

    #[error("Protocol {protocol} For Request {request} Not Supported")]
    UnsupportedProtocol { request: String, protocol: String },

    #[error("Status Code For Request {0} Is Invalid")]
    InvalidStatusCode(String),

    #[error("Request {request} Expected Response Invalid Expected Type For Field {field}: {field_type}")]
    InvalidExpectedType {
        request: String,
        field: String,
        field_type: String,
    },

    #[error("No Endpoints Set")]
    NoEndpoints,

    #[error("Field {field} Type Is Not Supported: {field_type}")]
    UnsupportedParamType { field: String, field_type: String },

    #[error("Path Param For URL {url}, Method {method} Not Valid: {source}")]
    PathParam {
        url: String,
        method: String,
        #[source]
        source: Box<ValidationError>,
    },

    #[error("Query Param For URL {url}, Method {method} Not Valid: {source}")]
    QueryParam {
        url: String,
        method: String,
        #[source]
        source: Box<ValidationError>,
    },

    #[error("Body Field Type For URL {url}, Method {method}, Field {field} Type Is Not Supported: {field_type}")]
    UnsupportedBodyType {
        url: String,
        method: String,
        field: String,
        field_type: String,
    },

    #[error("Response Not Set For URL {url}, Method {method}")]
    ResponseNotSet { url: String, method: String },

    #[error("Both Response And Responses Set For URL {url}, Method {method}")]
    AmbiguousResponse { url: String, method: String },

    #[error("Error Validating Response Action URL {url}, Method {method}: {source}")]
    ResponseAction {
        url: String,
        method: String,
        #[source]
        source: Box<ValidationError>,
    },

    #[error("Response Weighting For URL {url}, Method {method}, Does Not Equal 100 (got {total})")]
    ResponseWeighting { url: String, method: String, total: i64 },

    #[error("Response Weighting For URL {url}, Method {method}, Overflows")]
    ResponseWeightOverflow { url: String, method: String },

    #[error("Error Validating URL {url}, Method {method}: {source}")]
    EndpointAction {
        url: String,
        method: String,
        #[source]
        source: Box<ValidationError>,
    },
}

impl ValidationError {
    /// True when the document was rejected before any semantic check ran.
    pub fn is_unsupported_version(&self) -> bool {
        matches!(self, ValidationError::UnsupportedVersion(_))
    }
}
