#![allow(unreachable_pub, clippy::pedantic)]

/// Files generated using [`prost-build`] from the cosmos-sdk, ethermint and elder protobuf
/// definitions. Only the messages needed to build, sign and simulate an elder transaction are
/// checked in.
///
/// [`prost-build`]: https://docs.rs/prost-build
#[path = ""]
pub mod cosmos {
    #[path = ""]
    pub mod base {
        #[path = "cosmos.base.v1beta1.rs"]
        pub mod v1beta1;
    }

    #[path = ""]
    pub mod tx {
        #[path = "cosmos.tx.v1beta1.rs"]
        pub mod v1beta1;

        #[path = ""]
        pub mod signing {
            #[path = "cosmos.tx.signing.v1beta1.rs"]
            pub mod v1beta1;
        }
    }
}

#[path = ""]
pub mod elder {
    #[path = "elder.router.rs"]
    pub mod router;

    #[path = ""]
    pub mod crypto {
        #[path = "elder.crypto.eldersecp256k1.rs"]
        pub mod eldersecp256k1;
    }
}

#[path = ""]
pub mod ethermint {
    #[path = ""]
    pub mod crypto {
        #[path = ""]
        pub mod v1 {
            #[path = "ethermint.crypto.v1.ethsecp256k1.rs"]
            pub mod ethsecp256k1;
        }
    }
}
