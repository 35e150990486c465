use axum::http::Method;
use serde_json::{json, Map, Value};

/// The lambda a route is proxied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerFunction {
    Blog,
    User,
}

impl HandlerFunction {
    pub fn logical_id(self) -> &'static str {
        match self {
            Self::Blog => "BlogLambda",
            Self::User => "UserLambda",
        }
    }
}

#[derive(Debug)]
pub struct RouteSpec {
    pub path_part: &'static str,
    pub methods: &'static [Method],
    pub handler: HandlerFunction,
}

impl RouteSpec {
    pub fn path(&self) -> String {
        format!("/{}", self.path_part)
    }

    fn resource_id(&self) -> String {
        format!("BlogApi{}", pascal_case(self.path_part))
    }
}

/// Resource paths exposed by the front door. The router and the template both read this table.
pub static ROUTES: &[RouteSpec] = &[
    RouteSpec {
        path_part: "posts",
        methods: &[Method::POST, Method::GET, Method::PUT, Method::DELETE],
        handler: HandlerFunction::Blog,
    },
    RouteSpec {
        path_part: "user",
        methods: &[Method::PUT],
        handler: HandlerFunction::User,
    },
];

pub const STAGE_NAME: &str = "prod";

fn pascal_case(part: &str) -> String {
    let mut chars = part.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// REST API, its resources and one proxy method per declared route and verb.
pub(crate) fn api_resources(api_name: &str, resources: &mut Map<String, Value>) {
    resources.insert(
        "BlogApi".to_string(),
        json!({
            "Type": "AWS::ApiGateway::RestApi",
            "Properties": { "Name": api_name },
        }),
    );

    let mut method_ids = Vec::new();

    for route in ROUTES {
        let resource_id = route.resource_id();
        resources.insert(
            resource_id.clone(),
            json!({
                "Type": "AWS::ApiGateway::Resource",
                "Properties": {
                    "RestApiId": { "Ref": "BlogApi" },
                    "ParentId": { "Fn::GetAtt": ["BlogApi", "RootResourceId"] },
                    "PathPart": route.path_part,
                },
            }),
        );

        for method in route.methods {
            let method_id = format!("{}{}", resource_id, method.as_str());
            resources.insert(
                method_id.clone(),
                json!({
                    "Type": "AWS::ApiGateway::Method",
                    "Properties": {
                        "RestApiId": { "Ref": "BlogApi" },
                        "ResourceId": { "Ref": resource_id },
                        "HttpMethod": method.as_str(),
                        "AuthorizationType": "NONE",
                        "Integration": {
                            "Type": "AWS_PROXY",
                            "IntegrationHttpMethod": "POST",
                            "Uri": {
                                "Fn::Sub": format!(
                                    "arn:${{AWS::Partition}}:apigateway:${{AWS::Region}}:lambda:path/2015-03-31/functions/${{{}.Arn}}/invocations",
                                    route.handler.logical_id()
                                ),
                            },
                        },
                    },
                }),
            );
            method_ids.push(Value::String(method_id));
        }
    }

    for handler in [HandlerFunction::Blog, HandlerFunction::User] {
        resources.insert(
            format!("{}ApiPermission", handler.logical_id()),
            json!({
                "Type": "AWS::Lambda::Permission",
                "Properties": {
                    "Action": "lambda:InvokeFunction",
                    "FunctionName": { "Fn::GetAtt": [handler.logical_id(), "Arn"] },
                    "Principal": "apigateway.amazonaws.com",
                    "SourceArn": {
                        "Fn::Sub": "arn:${AWS::Partition}:execute-api:${AWS::Region}:${AWS::AccountId}:${BlogApi}/*/*/*",
                    },
                },
            }),
        );
    }

    resources.insert(
        "BlogApiDeployment".to_string(),
        json!({
            "Type": "AWS::ApiGateway::Deployment",
            "DependsOn": method_ids,
            "Properties": {
                "RestApiId": { "Ref": "BlogApi" },
                "StageName": STAGE_NAME,
            },
        }),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn posts_route_declares_crud_verbs() {
        let posts = ROUTES.iter().find(|r| r.path() == "/posts").unwrap();
        assert_eq!(posts.methods.len(), 4);
        assert_eq!(posts.handler, HandlerFunction::Blog);

        let user = ROUTES.iter().find(|r| r.path() == "/user").unwrap();
        assert_eq!(user.methods, &[Method::PUT]);
    }

    #[test]
    fn one_method_resource_per_route_verb() {
        let mut resources = Map::new();
        api_resources("Blog API", &mut resources);

        assert!(resources.contains_key("BlogApiPostsDELETE"));
        assert!(resources.contains_key("BlogApiUserPUT"));
        assert!(!resources.contains_key("BlogApiUserGET"));
        assert_eq!(
            resources["BlogApiDeployment"]["DependsOn"]
                .as_array()
                .map(Vec::len),
            Some(5)
        );
    }
}
