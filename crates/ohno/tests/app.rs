// Copyright (c) Microsoft Corporation.

//! App module tests.

mod app {
    mod app_err;
    mod bail;
    mod chain;
    mod construction;
    mod conversion;
    mod enrich_err;
    mod into_std_error;
    mod ohwell_trait;
}
