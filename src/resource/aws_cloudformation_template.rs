//! AWS CloudFormation templates (`/v3/cft`)

use super::kind::{Association, Field, ResourceKind, owner_user_groups, owner_users};
use crate::schema::{AttributeKind::*, Mode::*};

static FIELDS: &[Field] = &[
    Field::new("description", String, Optional),
    Field::new("name", String, Required),
    Field::new("policy", String, Required),
    Field::new("region", String, Optional),
    Field::new("regions", StringList, Required),
    Field::new("sns_arns", String, Optional),
    Field::new("template_parameters", String, Optional),
    Field::new("termination_protection", Bool, Optional),
];

static ASSOCIATIONS: &[Association] = &[owner_users(), owner_user_groups()];

pub static KIND: ResourceKind = ResourceKind {
    name: "aws_cloudformation_template",
    label: "AwsCloudformationTemplate",
    path: "/v3/cft",
    delete_path: None,
    envelope: Some("cft"),
    gone_flag: None,
    list_envelope: Some("cft"),
    create_envelope: None,
    fields: FIELDS,
    associations: ASSOCIATIONS,
    singles: &[],
    data_source: true,
    list_scope: None,
};
