//! Generates the `expand.v1.ExpandService` client and server stubs.
//!
//! The wire messages are declared with prost derives in `src/grpc/proto.rs`,
//! so the service is described with the manual builder and no `protoc` is
//! needed at build time.

fn main() {
    let expand_service = tonic_build::manual::Service::builder()
        .name("ExpandService")
        .package("expand.v1")
        .method(
            tonic_build::manual::Method::builder()
                .name("expand")
                .route_name("Expand")
                .input_type("crate::grpc::proto::ExpandRequest")
                .output_type("crate::grpc::proto::ExpandResponse")
                .codec_path("tonic::codec::ProstCodec")
                .build(),
        )
        .build();

    tonic_build::manual::Builder::new().compile(&[expand_service]);
}
