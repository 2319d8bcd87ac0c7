use std::hint::black_box;
use std::io::Read;

use bencher::{PAYLOADS, PayloadSize, URL_SEEDS};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use micro_client::{Client, accept, content_type, expect_success, post, read_bytes_response, text};
use micro_wire::WireError;
use micro_wire::body::{ByteBody, write_body};
use micro_wire::protocol::{RequestReader, ResponseWriter};
use micro_wire::sender::{HttpSender, Loopback};
use micro_wire::url::UrlBuilder;

fn echo(request: &mut dyn RequestReader, response: &mut dyn ResponseWriter<'static>) -> Result<(), WireError> {
    let mut content = Vec::new();
    request.body().read_to_end(&mut content)?;
    write_body(response, &ByteBody::new(content))
}

fn benchmark_url_builder(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("url_builder");

    for seed in URL_SEEDS {
        group.throughput(Throughput::Bytes(seed.len() as u64));
        group.bench_with_input(BenchmarkId::new("build", seed.len()), &seed, |b, seed| {
            b.iter(|| {
                let url = UrlBuilder::from_seed(seed).join_path("items").query("q", "bench").build();
                black_box(url.map(|url| url.wire_format()))
            });
        });
    }

    group.finish();
}

fn benchmark_loopback_exchange(criterion: &mut Criterion) {
    let client = Client::new(HttpSender::new(Loopback::new(echo)));
    let url = UrlBuilder::new().http().host_and_port("localhost:8080").join_path("echo");
    let mut group = criterion.benchmark_group("loopback_exchange");

    for payload in &PAYLOADS {
        if payload.size() == PayloadSize::Large {
            group.sample_size(50);
        }
        group.throughput(Throughput::Bytes(payload.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(payload.name()), payload, |b, payload| {
            b.iter(|| {
                let mut output = Vec::new();
                client
                    .request([
                        post(url.clone()),
                        content_type(mime::APPLICATION_JSON),
                        accept([mime::APPLICATION_JSON]),
                        text(payload.content()),
                    ])
                    .handle([expect_success(), read_bytes_response(&mut output)])
                    .expect("loopback exchange should succeed");
                black_box(output)
            });
        });
    }

    group.finish();
}

criterion_group!(exchange, benchmark_url_builder, benchmark_loopback_exchange);
criterion_main!(exchange);
