mod integration_flow_test;
