use bounded_thompson::{
    AssignError, AssignmentConfig, DEFAULT_EPSILON, DEFAULT_PARETO_SHAPE, EpsilonThompson,
    ParetoBetaPrior,
};

#[test]
fn test_config_json_round_trip() {
    let config = AssignmentConfig::builder()
        .epsilon(0.25)
        .num_draws(20)
        .prior(ParetoBetaPrior::new(2.5).unwrap())
        .build()
        .unwrap();

    let json = serde_json::to_string(&config).unwrap();
    assert!(json.contains("\"prior_shape\":2.5"));

    let restored: AssignmentConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, config);
}

#[test]
fn test_missing_fields_use_defaults() {
    let json = r#"{"epsilon": 0.25, "num_draws": 20}"#;
    let config: AssignmentConfig = serde_json::from_str(json).unwrap();
    assert_eq!(config.epsilon(), 0.25);
    assert_eq!(config.num_draws(), 20);
    assert_eq!(config.prior().shape(), DEFAULT_PARETO_SHAPE);

    let config: AssignmentConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config, AssignmentConfig::default());
    assert_eq!(config.epsilon(), DEFAULT_EPSILON);
}

#[test]
fn test_out_of_range_config_rejected_by_policy() {
    // Deserialization accepts anything numeric; the policy validates
    let json = r#"{"epsilon": 1.5, "num_draws": 20}"#;
    let config: AssignmentConfig = serde_json::from_str(json).unwrap();
    assert!(config.validate().is_err());
    assert!(matches!(
        EpsilonThompson::new(config),
        Err(AssignError::InvalidParameter { .. })
    ));

    let config: AssignmentConfig = serde_json::from_str(r#"{"prior_shape": -1.0}"#).unwrap();
    assert!(EpsilonThompson::new(config).is_err());
}

#[test]
fn test_policy_exposes_config() {
    let config = AssignmentConfig::new(0.05, 100).unwrap();
    let policy = EpsilonThompson::new(config).unwrap();
    assert_eq!(policy.epsilon(), 0.05);
    assert_eq!(policy.config(), &config);
}
