//! Declarative definition of the deployed blog API.
//!
//! [`BlogApiStack`] describes the posts table, the user directory and its hosted login,
//! the two handler functions with their grants, and the REST front door. It renders as a
//! CloudFormation-style JSON template; deploying that template is left to external tooling.

use std::fmt;

use serde_json::{json, Map, Value};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::config::non_empty_var;

pub mod api;
pub mod identity;

pub const DEFAULT_REGION: &str = "eu-west-2";
pub const API_NAME: &str = "Blog API";

#[derive(Debug)]
pub enum StackError {
    MissingVar(&'static str),
    Invalid(ValidationErrors),
}

impl fmt::Display for StackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingVar(key) => write!(f, "{} must be set", key),
            Self::Invalid(errors) => write!(f, "invalid stack configuration: {}", errors),
        }
    }
}

impl std::error::Error for StackError {}

impl From<ValidationErrors> for StackError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Invalid(errors)
    }
}

#[derive(Debug, Clone)]
pub struct GoogleCredentials {
    pub client_id: String,
    pub client_secret: String,
}

#[derive(Debug, Clone, Validate)]
pub struct StackConfig {
    pub account: Option<String>,
    pub region: String,
    #[validate(custom(function = "validate_domain_prefix"))]
    pub domain_prefix: String,
    #[validate(url(message = "callback URL must be a valid URL"))]
    pub callback_url: String,
    #[validate(url(message = "logout URL must be a valid URL"))]
    pub logout_url: String,
    pub google: Option<GoogleCredentials>,
    /// Deployed app client id, used only to print hosted UI links.
    pub oauth_client_id: Option<String>,
}

impl StackConfig {
    pub fn from_env() -> Result<Self, StackError> {
        Self::from_vars(non_empty_var)
    }

    pub fn from_vars<F>(var: F) -> Result<Self, StackError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| var(key).ok_or(StackError::MissingVar(key));

        let google = match (var("GOOGLE_CLIENT_ID"), var("GOOGLE_CLIENT_SECRET")) {
            (Some(client_id), Some(client_secret)) => Some(GoogleCredentials {
                client_id,
                client_secret,
            }),
            _ => None,
        };

        let config = StackConfig {
            account: var("CDK_DEFAULT_ACCOUNT"),
            region: var("CDK_DEFAULT_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string()),
            domain_prefix: required("COGNITO_DOMAIN_PREFIX")?,
            callback_url: required("COGNITO_CALLBACK_URL")?,
            logout_url: required("COGNITO_LOGOUT_URL")?,
            google,
            oauth_client_id: var("OAUTH_CLIENT_ID"),
        };

        config.validate()?;
        Ok(config)
    }
}

fn validate_domain_prefix(prefix: &str) -> Result<(), ValidationError> {
    let valid_chars = prefix
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');

    if prefix.is_empty()
        || prefix.len() > 63
        || !valid_chars
        || prefix.starts_with('-')
        || prefix.ends_with('-')
    {
        let mut err = ValidationError::new("domain_prefix");
        err.message = Some(
            "domain prefix must be 1-63 lowercase letters, digits or inner hyphens".into(),
        );
        return Err(err);
    }
    Ok(())
}

pub struct BlogApiStack<'a> {
    config: &'a StackConfig,
}

impl<'a> BlogApiStack<'a> {
    pub fn new(config: &'a StackConfig) -> Self {
        Self { config }
    }

    pub fn to_template(&self) -> Value {
        let mut resources = Map::new();

        resources.insert(
            "BlogTable".to_string(),
            json!({
                "Type": "AWS::DynamoDB::Table",
                "Properties": {
                    "KeySchema": [{ "AttributeName": "id", "KeyType": "HASH" }],
                    "AttributeDefinitions": [{ "AttributeName": "id", "AttributeType": "S" }],
                    "BillingMode": "PAY_PER_REQUEST",
                },
                "DeletionPolicy": "Retain",
            }),
        );

        identity::identity_resources(self.config, &mut resources);
        self.function_resources(&mut resources);
        api::api_resources(API_NAME, &mut resources);

        let mut template = json!({
            "AWSTemplateFormatVersion": "2010-09-09",
            "Description": "Blog API: posts table, user directory, handler functions and REST front door",
            "Parameters": {
                "CodeBucket": { "Type": "String" },
                "CodeKey": { "Type": "String" },
            },
            "Resources": resources,
            "Outputs": {
                "ApiUrl": {
                    "Description": "API Gateway URL",
                    "Value": {
                        "Fn::Sub": format!(
                            "https://${{BlogApi}}.execute-api.${{AWS::Region}}.${{AWS::URLSuffix}}/{}/",
                            api::STAGE_NAME
                        ),
                    },
                },
                "UserPoolId": {
                    "Description": "Cognito User Pool ID",
                    "Value": { "Ref": "UserPool" },
                },
                "UserPoolClientId": {
                    "Description": "Cognito User Pool Client ID",
                    "Value": { "Ref": "UserPoolAppClient" },
                },
            },
        });

        if let Some(account) = &self.config.account {
            template["Metadata"] = json!({ "Account": account, "Region": self.config.region });
        }

        template
    }

    fn function_resources(&self, resources: &mut Map<String, Value>) {
        for (function, role, environment) in [
            (
                "BlogLambda",
                "BlogLambdaRole",
                json!({ "TABLE_NAME": { "Ref": "BlogTable" } }),
            ),
            (
                "UserLambda",
                "UserLambdaRole",
                json!({ "USER_POOL_ID": { "Ref": "UserPool" } }),
            ),
        ] {
            resources.insert(
                role.to_string(),
                json!({
                    "Type": "AWS::IAM::Role",
                    "Properties": {
                        "AssumeRolePolicyDocument": {
                            "Version": "2012-10-17",
                            "Statement": [{
                                "Effect": "Allow",
                                "Principal": { "Service": "lambda.amazonaws.com" },
                                "Action": "sts:AssumeRole",
                            }],
                        },
                        "ManagedPolicyArns": [{
                            "Fn::Sub": "arn:${AWS::Partition}:iam::aws:policy/service-role/AWSLambdaBasicExecutionRole",
                        }],
                    },
                }),
            );

            resources.insert(
                function.to_string(),
                json!({
                    "Type": "AWS::Lambda::Function",
                    "Properties": {
                        "Runtime": "provided.al2023",
                        "Handler": "bootstrap",
                        "Code": {
                            "S3Bucket": { "Ref": "CodeBucket" },
                            "S3Key": { "Ref": "CodeKey" },
                        },
                        "Role": { "Fn::GetAtt": [role, "Arn"] },
                        "Environment": { "Variables": environment },
                    },
                }),
            );
        }

        resources.insert(
            "BlogLambdaTableGrant".to_string(),
            json!({
                "Type": "AWS::IAM::Policy",
                "Properties": {
                    "PolicyName": "BlogLambdaTableReadWrite",
                    "Roles": [{ "Ref": "BlogLambdaRole" }],
                    "PolicyDocument": {
                        "Version": "2012-10-17",
                        "Statement": [{
                            "Effect": "Allow",
                            "Action": [
                                "dynamodb:BatchGetItem",
                                "dynamodb:GetRecords",
                                "dynamodb:GetShardIterator",
                                "dynamodb:Query",
                                "dynamodb:GetItem",
                                "dynamodb:Scan",
                                "dynamodb:ConditionCheckItem",
                                "dynamodb:BatchWriteItem",
                                "dynamodb:PutItem",
                                "dynamodb:UpdateItem",
                                "dynamodb:DeleteItem",
                                "dynamodb:DescribeTable",
                            ],
                            "Resource": [{ "Fn::GetAtt": ["BlogTable", "Arn"] }],
                        }],
                    },
                },
            }),
        );
    }
}
